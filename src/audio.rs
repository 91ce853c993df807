//! Audio resource resolution.
//!
//! The engine only needs two capabilities from the platform: turn an asset
//! identifier into a handle, and play or pause that handle. Decoding and
//! output are delegated to rodio when the `audio_playback` feature is on.

use crate::config::PlaybackConfig;
use crate::error::AssetError;
use std::path::{Path, PathBuf};

/// A loaded audio resource that can be started and paused.
pub trait PlaybackHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop for good; the handle is about to be dropped.
    fn stop(&mut self);
    fn is_paused(&self) -> bool;
    /// True once the audio has played through to its end.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Resolves asset identifiers into playable handles.
///
/// Implementations must fail with [`AssetError::NotFound`] when the
/// identifier does not name a bundled asset. A returned handle is paused.
pub trait AssetResolver {
    fn resolve(&mut self, asset_id: &str) -> Result<Box<dyn PlaybackHandle>, AssetError>;
}

/// Maps asset identifiers onto files inside the bundled asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocator {
    dir: PathBuf,
    extension: String,
}

impl AssetLocator {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(&config.asset_dir, &config.asset_extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an asset would live at, whether or not it exists.
    pub fn path_for(&self, asset_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", asset_id, self.extension))
    }

    /// Resolve an identifier to an existing file.
    ///
    /// Identifiers that try to climb out of the asset directory are treated
    /// as missing.
    pub fn locate(&self, asset_id: &str) -> Result<PathBuf, AssetError> {
        let path = self.path_for(asset_id);
        let escapes = asset_id.is_empty()
            || Path::new(asset_id)
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)));

        if escapes || !path.is_file() {
            return Err(AssetError::NotFound {
                asset_id: asset_id.to_string(),
                path,
            });
        }
        Ok(path)
    }
}

/// Handle that tracks play/pause without producing sound.
#[derive(Debug, Default)]
pub struct SilentHandle {
    paused: bool,
}

impl PlaybackHandle for SilentHandle {
    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn stop(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Resolver for muted runs and machines without an output device.
///
/// Assets are still required to exist so captions never run for an item
/// that could not have played.
#[derive(Debug, Clone)]
pub struct SilentAssets {
    locator: AssetLocator,
}

impl SilentAssets {
    pub fn new(locator: AssetLocator) -> Self {
        Self { locator }
    }
}

impl AssetResolver for SilentAssets {
    fn resolve(&mut self, asset_id: &str) -> Result<Box<dyn PlaybackHandle>, AssetError> {
        let path = self.locator.locate(asset_id)?;
        tracing::debug!(asset_id, path = %path.display(), "Resolved asset (muted)");
        Ok(Box::new(SilentHandle { paused: true }))
    }
}

#[cfg(feature = "audio_playback")]
pub use rodio_backend::{RodioAssets, RodioHandle};

#[cfg(feature = "audio_playback")]
mod rodio_backend {
    use super::{AssetLocator, AssetResolver, PlaybackHandle};
    use crate::error::{AssetError, AudioError};
    use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
    use std::fs::File;
    use std::io::BufReader;

    /// A rodio sink carrying one decoded asset.
    pub struct RodioHandle {
        sink: Sink,
    }

    impl PlaybackHandle for RodioHandle {
        fn play(&mut self) {
            self.sink.play();
        }

        fn pause(&mut self) {
            self.sink.pause();
        }

        fn stop(&mut self) {
            self.sink.stop();
        }

        fn is_paused(&self) -> bool {
            self.sink.is_paused()
        }

        fn is_finished(&self) -> bool {
            self.sink.empty()
        }
    }

    /// Resolver that decodes bundled files onto the default output device.
    pub struct RodioAssets {
        locator: AssetLocator,
        stream: OutputStream,
        volume: f32,
    }

    impl RodioAssets {
        pub fn open(locator: AssetLocator, volume: f32) -> Result<Self, AudioError> {
            let stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
                AudioError::OutputUnavailable {
                    reason: e.to_string(),
                }
            })?;

            tracing::info!(dir = %locator.dir().display(), volume, "Audio output opened");

            Ok(Self {
                locator,
                stream,
                volume,
            })
        }
    }

    impl AssetResolver for RodioAssets {
        fn resolve(&mut self, asset_id: &str) -> Result<Box<dyn PlaybackHandle>, AssetError> {
            let path = self.locator.locate(asset_id)?;
            let file = File::open(&path).map_err(|source| AssetError::Unreadable {
                path: path.clone(),
                source,
            })?;

            let decoder =
                Decoder::new(BufReader::new(file)).map_err(|e| AssetError::DecodeFailed {
                    asset_id: asset_id.to_string(),
                    reason: e.to_string(),
                })?;

            let sink = Sink::connect_new(self.stream.mixer());
            sink.pause();
            sink.set_volume(self.volume);
            sink.append(decoder);

            tracing::debug!(asset_id, path = %path.display(), "Decoded asset");
            Ok(Box::new(RodioHandle { sink }))
        }
    }
}

/// Pick the audio backend for this run.
///
/// Falls back to [`SilentAssets`] when muted or when no output device can be
/// opened, so captions keep working either way.
pub fn open_resolver(config: &PlaybackConfig, mute: bool) -> Box<dyn AssetResolver> {
    let locator = AssetLocator::from_config(config);

    if mute {
        tracing::info!("Audio muted; captions only");
        return Box::new(SilentAssets::new(locator));
    }

    #[cfg(feature = "audio_playback")]
    {
        match RodioAssets::open(locator.clone(), config.volume) {
            Ok(assets) => return Box::new(assets),
            Err(e) => tracing::warn!("{}; continuing without sound", e),
        }
    }

    #[cfg(not(feature = "audio_playback"))]
    tracing::info!("Built without audio_playback; captions only");

    Box::new(SilentAssets::new(locator))
}
