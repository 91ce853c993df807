//! Bundled-asset resolution against real files on disk.

use adzan_player::app::build_engine;
use adzan_player::audio::{AssetLocator, AssetResolver, PlaybackHandle, SilentAssets};
use adzan_player::catalog::Catalog;
use adzan_player::config::AppConfig;
use adzan_player::error::{AdzanError, AssetError};
use adzan_player::state::PlaybackStatus;
use std::f32::consts::PI;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Write a short mono tone as `<dir>/<name>.wav`.
fn write_tone(dir: &Path, name: &str) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(dir.join(format!("{}.wav", name)), spec).unwrap();
    for i in 0..800 {
        let t = i as f32 / 8000.0;
        let sample = (2.0 * PI * 440.0 * t).sin() * 0.5;
        writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn asset_dir_with(names: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    for name in names {
        write_tone(dir.path(), name);
    }
    dir
}

fn muted_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.playback.asset_dir = dir.to_path_buf();
    config.playback.asset_extension = "wav".to_string();
    config
}

#[test]
fn test_silent_assets_resolve_bundled_file() {
    let dir = asset_dir_with(&["mekkah"]);
    let mut assets = SilentAssets::new(AssetLocator::new(dir.path(), "wav"));

    let handle = assets.resolve("mekkah").expect("tone was written");
    assert!(handle.is_paused());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = asset_dir_with(&["mekkah"]);
    let mut assets = SilentAssets::new(AssetLocator::new(dir.path(), "wav"));

    match assets.resolve("cianjur") {
        Err(AssetError::NotFound { asset_id, path }) => {
            assert_eq!(asset_id, "cianjur");
            assert_eq!(path, dir.path().join("cianjur.wav"));
        }
        Err(other) => panic!("expected NotFound, got {}", other),
        Ok(_) => panic!("expected NotFound, got a handle"),
    }
}

#[test]
fn test_wrong_extension_is_not_found() {
    let dir = asset_dir_with(&["mekkah"]);
    let mut assets = SilentAssets::new(AssetLocator::new(dir.path(), "mp3"));
    assert!(assets.resolve("mekkah").is_err());
}

#[test]
fn test_muted_engine_plays_default_catalog() {
    let dir = asset_dir_with(&["mekkah"]);
    let config = muted_config(dir.path());
    let mut engine = build_engine(&config, true).expect("valid config");
    let catalog = Catalog::from_entries(&config.catalog);

    for item in catalog.iter() {
        engine.play(item).expect("both items share the mekkah asset");
        assert_eq!(engine.current_item(), Some(item));
        assert_eq!(engine.status(), PlaybackStatus::Playing);
    }
    assert_eq!(engine.metrics().plays(), 2);
}

#[test]
fn test_muted_engine_reports_missing_bundle() {
    let dir = tempdir().unwrap();
    let config = muted_config(dir.path());
    let mut engine = build_engine(&config, true).unwrap();
    let catalog = Catalog::from_entries(&config.catalog);

    let err = engine.play(catalog.get(0).unwrap()).unwrap_err();
    assert!(matches!(err, AdzanError::Asset(AssetError::NotFound { .. })));
    assert!(err.user_message().contains("mekkah"));
    assert_eq!(engine.status(), PlaybackStatus::Idle);
}

#[test]
fn test_build_engine_rejects_bad_captions() {
    let dir = tempdir().unwrap();
    let mut config = muted_config(dir.path());
    config.captions = Some(adzan_player::captions::CaptionConfig {
        source_lines: vec!["a".to_string(), "b".to_string()],
        transliterated_lines: vec!["a".to_string()],
    });

    assert!(build_engine(&config, true).is_err());
}

#[test]
fn test_build_engine_rejects_bad_interval() {
    let dir = tempdir().unwrap();
    for secs in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
        let mut config = muted_config(dir.path());
        config.playback.caption_interval_secs = secs;

        let result = build_engine(&config, true);
        assert!(
            matches!(result, Err(AdzanError::Config(_))),
            "interval {} should be rejected",
            secs
        );
    }
}

#[test]
fn test_config_file_drives_engine() {
    let assets = asset_dir_with(&["madinah"]);
    let config_dir = tempdir().unwrap();
    let config_path = config_dir.path().join("config.toml");

    let contents = format!(
        r#"
[playback]
caption_interval_secs = 1.5
asset_dir = "{}"
asset_extension = "wav"

[[catalog]]
name = "Adzan Madinah"
location = "Madinah"
asset = "madinah"
"#,
        assets.path().display().to_string().replace('\\', "\\\\")
    );
    std::fs::write(&config_path, contents).unwrap();

    let config = AppConfig::load_from_file(&config_path).unwrap();
    config.validate().unwrap();
    let catalog = Catalog::from_entries(&config.catalog);
    assert_eq!(catalog.len(), 1);

    let mut engine = build_engine(&config, true).unwrap();
    assert_eq!(engine.interval().as_secs_f64(), 1.5);
    engine.play(catalog.get(0).unwrap()).unwrap();
    assert!(engine.is_playing());
}
