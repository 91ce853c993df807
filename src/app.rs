use crate::audio::open_resolver;
use crate::catalog::Catalog;
use crate::config::{AppConfig, UiConfig, VisualizerStyle};
use crate::engine::PlaybackEngine;
use crate::error::Result;
use crate::metrics::PlaybackMetrics;
use crate::ui::banner::BannerPanel;
use crate::ui::captions::CaptionPanel;
use crate::ui::catalog::CatalogPanel;
use crate::ui::controls::{ControlAction, ControlsPanel};
use crate::ui::visualizer::VisualizerPanel;
use crate::visualizer::{BarLevels, WavePhase};
use eframe::egui;
use std::sync::Arc;
use std::time::Instant;

const ARABIC_FONT_NAME: &str = "arabic";

/// Wire configuration into a ready engine.
///
/// The config is validated first, so hand-built configs get the same
/// checks as ones loaded from disk.
pub fn build_engine(config: &AppConfig, mute: bool) -> Result<PlaybackEngine> {
    config.validate()?;
    let captions = config.caption_track()?;
    let resolver = open_resolver(&config.playback, mute);
    let engine = PlaybackEngine::with_system_clock(
        resolver,
        captions,
        config.playback.caption_interval(),
    );

    if config.metrics.enabled {
        Ok(engine.with_metrics(PlaybackMetrics::from_config(&config.metrics)?))
    } else {
        Ok(engine)
    }
}

/// Register the configured Arabic font as a fallback for proportional text.
pub fn install_fonts(ctx: &egui::Context, config: &UiConfig) -> Result<()> {
    let Some(path) = &config.arabic_font_path else {
        return Ok(());
    };

    let bytes = std::fs::read(path)?;
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        ARABIC_FONT_NAME.to_string(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(ARABIC_FONT_NAME.to_string());
    ctx.set_fonts(fonts);

    tracing::info!(path = %path.display(), "Loaded Arabic font");
    Ok(())
}

pub struct AdzanApp {
    engine: PlaybackEngine,
    catalog: Catalog,
    config: AppConfig,
    bars: BarLevels,
    wave: WavePhase,
    status_line: Option<String>,
}

impl AdzanApp {
    pub fn new(ctx: &egui::Context, config: AppConfig, mut engine: PlaybackEngine) -> Self {
        if let Err(e) = install_fonts(ctx, &config.ui) {
            tracing::warn!("Arabic font unavailable, captions may not render: {}", e);
        }

        let repaint = ctx.clone();
        engine.subscribe(move |_| repaint.request_repaint());

        Self {
            engine,
            catalog: Catalog::from_entries(&config.catalog),
            bars: BarLevels::from_config(&config.visualizer),
            wave: WavePhase::new(config.visualizer.wave_period()),
            config,
            status_line: None,
        }
    }

    fn handle_select(&mut self, index: usize) {
        let Some(item) = self.catalog.get(index) else {
            return;
        };

        match self.engine.select_and_play(item) {
            Ok(()) => self.status_line = None,
            Err(e) => self.status_line = Some(e.user_message()),
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        if !self.engine.is_playing() {
            return;
        }

        match self.config.visualizer.style {
            VisualizerStyle::Wave => ctx.request_repaint(),
            VisualizerStyle::Bars => {
                let refresh = self.bars.refresh_interval();
                let next = self
                    .engine
                    .time_until_next_tick()
                    .map_or(refresh, |tick| tick.min(refresh));
                ctx.request_repaint_after(next);
            }
        }
    }
}

impl eframe::App for AdzanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.engine.poll();

        let is_playing = self.engine.is_playing();
        match self.config.visualizer.style {
            VisualizerStyle::Bars => {
                self.bars.update(now, is_playing, &mut rand::thread_rng());
            }
            VisualizerStyle::Wave => self.wave.update(now, is_playing),
        }

        let mut selected = None;
        let mut action = None;

        if self.config.banner.enabled {
            egui::TopBottomPanel::bottom("banner_panel")
                .exact_height(self.config.banner.height)
                .show(ctx, |ui| BannerPanel::draw(ui, &self.config.banner));
        }

        if self.config.metrics.enabled && self.config.metrics.show_metrics_panel {
            egui::TopBottomPanel::bottom("metrics_panel").show(ctx, |ui| {
                self.engine.metrics().summary(now).ui_panel(ui);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);
            CaptionPanel::draw(ui, &self.engine.current_caption_pair());

            if is_playing {
                ui.add_space(8.0);
                match self.config.visualizer.style {
                    VisualizerStyle::Bars => VisualizerPanel::draw_bars(ui, &self.bars),
                    VisualizerStyle::Wave => VisualizerPanel::draw_wave(ui, self.wave.phase()),
                }
            }

            if self.engine.has_active_item() {
                ui.add_space(8.0);
                action = ControlsPanel::draw(ui, self.engine.status());
            }

            if let Some(message) = &self.status_line {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), message);
            }

            ui.separator();
            let current = self.engine.current_item().map(|item| item.id());
            selected = CatalogPanel::draw(ui, &self.catalog, current);
        });

        if let Some(ControlAction::TogglePlayback) = action {
            self.engine.toggle_play_pause();
        }
        if let Some(index) = selected {
            self.handle_select(index);
        }

        self.schedule_repaint(ctx);
    }
}

impl Drop for AdzanApp {
    fn drop(&mut self) {
        let summary = self.engine.metrics().summary(Instant::now());
        tracing::info!("Session metrics: {}", summary.line());
    }
}
