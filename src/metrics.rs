//! Playback metrics collection and reporting.
//!
//! Uses an HDR histogram for asset-resolve latency percentiles.

use crate::config::MetricsConfig;
use crate::error::ConfigError;
use hdrhistogram::Histogram;
use std::time::{Duration, Instant};

const DEFAULT_MAX_MS: u64 = 10_000;
const DEFAULT_PRECISION: u8 = 2;

/// Engine-wide playback metrics
#[derive(Debug)]
pub struct PlaybackMetrics {
    /// Asset resolution latency histogram (microseconds)
    resolve_latency_us: Histogram<u64>,

    /// Successful `play` calls
    plays: u64,

    /// `play` calls rejected by the resolver
    failed_plays: u64,

    /// Pauses via toggle
    pauses: u64,

    /// Resumes via toggle
    resumes: u64,

    /// Toggles ignored because nothing was loaded
    ignored_toggles: u64,

    /// Timer ticks delivered
    ticks: u64,

    /// Time accumulated in the Playing state
    playing_time: Duration,

    /// Start of the current Playing stretch
    playing_since: Option<Instant>,

    created: Instant,
}

/// Summary of key metrics for display
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub resolve_p50_ms: f64,
    pub resolve_p99_ms: f64,
    pub plays: u64,
    pub failed_plays: u64,
    pub pauses: u64,
    pub resumes: u64,
    pub ignored_toggles: u64,
    pub ticks: u64,
    pub playing_secs: f64,
    pub uptime_secs: f64,
}

impl Default for PlaybackMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        let histogram =
            Histogram::new_with_bounds(1, DEFAULT_MAX_MS * 1000, DEFAULT_PRECISION)
                .expect("Histogram creation should succeed");
        Self::with_histogram(histogram)
    }

    /// Create a collector sized from configuration
    pub fn from_config(config: &MetricsConfig) -> Result<Self, ConfigError> {
        let histogram = Histogram::new_with_bounds(
            1,
            config.histogram_max_ms.saturating_mul(1000),
            config.histogram_precision,
        )
        .map_err(|e| ConfigError::ValidationFailed {
            reason: format!("Invalid metrics histogram bounds: {}", e),
        })?;
        Ok(Self::with_histogram(histogram))
    }

    fn with_histogram(resolve_latency_us: Histogram<u64>) -> Self {
        Self {
            resolve_latency_us,
            plays: 0,
            failed_plays: 0,
            pauses: 0,
            resumes: 0,
            ignored_toggles: 0,
            ticks: 0,
            playing_time: Duration::ZERO,
            playing_since: None,
            created: Instant::now(),
        }
    }

    /// Record how long a resolve call took
    pub fn record_resolve(&mut self, duration: Duration) {
        let us = (duration.as_micros() as u64).max(1);
        if let Err(e) = self.resolve_latency_us.record(us) {
            tracing::warn!("Failed to record resolve latency: {}", e);
        }
    }

    pub fn record_play(&mut self, now: Instant) {
        self.plays += 1;
        self.stop_playing_clock(now);
        self.playing_since = Some(now);
    }

    pub fn record_failed_play(&mut self) {
        self.failed_plays += 1;
    }

    pub fn record_pause(&mut self, now: Instant) {
        self.pauses += 1;
        self.stop_playing_clock(now);
    }

    pub fn record_resume(&mut self, now: Instant) {
        self.resumes += 1;
        self.playing_since = Some(now);
    }

    pub fn record_ignored_toggle(&mut self) {
        self.ignored_toggles += 1;
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    fn stop_playing_clock(&mut self, now: Instant) {
        if let Some(since) = self.playing_since.take() {
            self.playing_time += now.saturating_duration_since(since);
        }
    }

    pub fn plays(&self) -> u64 {
        self.plays
    }

    pub fn failed_plays(&self) -> u64 {
        self.failed_plays
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Get current metrics summary
    pub fn summary(&self, now: Instant) -> MetricsSummary {
        let open_stretch = self
            .playing_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();

        MetricsSummary {
            resolve_p50_ms: self.resolve_latency_us.value_at_quantile(0.5) as f64 / 1000.0,
            resolve_p99_ms: self.resolve_latency_us.value_at_quantile(0.99) as f64 / 1000.0,
            plays: self.plays,
            failed_plays: self.failed_plays,
            pauses: self.pauses,
            resumes: self.resumes,
            ignored_toggles: self.ignored_toggles,
            ticks: self.ticks,
            playing_secs: (self.playing_time + open_stretch).as_secs_f64(),
            uptime_secs: now.saturating_duration_since(self.created).as_secs_f64(),
        }
    }
}

impl MetricsSummary {
    /// One-line form for logs
    pub fn line(&self) -> String {
        format!(
            "plays={}, failed={}, pauses={}, resumes={}, ticks={}, playing={:.1}s",
            self.plays, self.failed_plays, self.pauses, self.resumes, self.ticks, self.playing_secs
        )
    }

    /// Render metrics as UI panel
    pub fn ui_panel(&self, ui: &mut egui::Ui) {
        ui.label("Playback Metrics");
        ui.indent("playback_metrics", |ui| {
            ui.monospace(format!(
                "Resolve P50/P99: {:.2}ms / {:.2}ms",
                self.resolve_p50_ms, self.resolve_p99_ms
            ));
            ui.monospace(format!(
                "Plays: {} ({} failed)  Pauses: {}  Resumes: {}",
                self.plays, self.failed_plays, self.pauses, self.resumes
            ));
            ui.monospace(format!(
                "Ticks: {}  Ignored toggles: {}",
                self.ticks, self.ignored_toggles
            ));
            ui.monospace(format!(
                "Playing: {:.1}s  Uptime: {:.1}s",
                self.playing_secs, self.uptime_secs
            ));
        });
    }
}
