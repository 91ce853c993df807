#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use adzan_player::app::{build_engine, AdzanApp};
use adzan_player::config::AppConfig;
use adzan_player::logging::init_logging;
use anyhow::Context;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "adzan_player", about = "Plays Adzan recordings with synchronized captions")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the bundled audio, overriding the config file
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Run captions without opening an audio device
    #[arg(long)]
    mute: bool,

    /// Debug-level logging for this crate
    #[arg(short, long)]
    verbose: bool,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);

    if args.write_default_config {
        AppConfig::default()
            .save_to_file(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "Wrote default config");
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&config_path);
    if let Some(assets) = args.assets {
        config.playback.asset_dir = assets;
    }

    let engine = build_engine(&config, args.mute).context("building playback engine")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Adzan Player",
        options,
        Box::new(move |cc| Ok(Box::new(AdzanApp::new(&cc.egui_ctx, config, engine)))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated: {}", e))
}
