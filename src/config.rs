//! Application configuration system with TOML persistence.
//!
//! Every section falls back to defaults, so a config file only needs the
//! keys it changes.

use crate::captions::{CaptionConfig, CaptionTrack};
use crate::catalog::{default_entries, CatalogEntry};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Playback and caption timing
    pub playback: PlaybackConfig,

    /// Decorative visualizer
    pub visualizer: VisualizerConfig,

    /// Window and font settings
    pub ui: UiConfig,

    /// Banner slot at the bottom of the window
    pub banner: BannerConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,

    /// Display-ordered recordings
    pub catalog: Vec<CatalogEntry>,

    /// Replaces the built-in Adzan captions when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<CaptionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds each caption stays on screen (0-60]
    pub caption_interval_secs: f64,

    /// Directory holding bundled audio
    pub asset_dir: PathBuf,

    /// File extension appended to asset identifiers
    pub asset_extension: String,

    /// Output volume (0.0-1.0)
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizerStyle {
    Bars,
    Wave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub style: VisualizerStyle,

    /// Number of bars in the bar style
    pub bar_count: usize,

    /// Lowest bar height in points
    pub min_level: f32,

    /// Highest bar height in points
    pub max_level: f32,

    /// How often bars pick new random levels
    pub refresh_interval_ms: u64,

    /// Time for the wave to shift a quarter cycle
    pub wave_period_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,

    /// Font with Arabic coverage; egui's bundled fonts have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arabic_font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub enabled: bool,
    pub ad_unit_id: String,
    pub height: f32,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable metrics collection
    pub enabled: bool,

    /// Enable metrics UI panel
    pub show_metrics_panel: bool,

    /// Histogram precision (significant value digits)
    pub histogram_precision: u8,

    /// Maximum histogram value in milliseconds
    pub histogram_max_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            visualizer: VisualizerConfig::default(),
            ui: UiConfig::default(),
            banner: BannerConfig::default(),
            metrics: MetricsConfig::default(),
            catalog: default_entries(),
            captions: None,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            caption_interval_secs: 3.0,
            asset_dir: PathBuf::from("assets"),
            asset_extension: "mp3".to_string(),
            volume: 1.0,
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            style: VisualizerStyle::Bars,
            bar_count: 20,
            min_level: 20.0,
            max_level: 80.0,
            refresh_interval_ms: 250,
            wave_period_ms: 800,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 420.0,
            window_height: 760.0,
            arabic_font_path: None,
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ad_unit_id: "ca-app-pub-3940256099942544/2934735716".to_string(),
            height: 50.0,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_metrics_panel: cfg!(debug_assertions),
            histogram_precision: 2,
            histogram_max_ms: 10_000,
        }
    }
}

impl PlaybackConfig {
    pub fn caption_interval(&self) -> Duration {
        Duration::from_secs_f64(self.caption_interval_secs)
    }
}

impl VisualizerConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn wave_period(&self) -> Duration {
        Duration::from_millis(self.wave_period_ms)
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::LoadFailed {
            path: Box::new(path.to_path_buf()),
            source,
        })?;

        Self::from_toml_str(&contents, path)
    }

    fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::InvalidFormat {
            path: Box::new(path.to_path_buf()),
            source,
        })
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from_file(path).and_then(|c| c.validate().map(|_| c)) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::SaveFailed {
                path: Box::new(path.to_path_buf()),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|source| ConfigError::SerializationFailed { source })?;

        std::fs::write(path, contents).map_err(|source| ConfigError::SaveFailed {
            path: Box::new(path.to_path_buf()),
            source,
        })
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "adzan", "adzan-player")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("adzan_player.toml"))
    }

    /// Caption track from the override, or the built-in Adzan lines.
    pub fn caption_track(&self) -> Result<CaptionTrack, ConfigError> {
        match &self.captions {
            Some(captions) => {
                CaptionTrack::try_from(captions).map_err(|e| ConfigError::ValidationFailed {
                    reason: e.to_string(),
                })
            }
            None => Ok(CaptionTrack::adzan()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.playback.caption_interval_secs;
        if !(interval > 0.0 && interval <= 60.0) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("Caption interval {}s out of range (0-60]s", interval),
            });
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("Volume {} out of range 0.0-1.0", self.playback.volume),
            });
        }

        if self.playback.asset_extension.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "Asset extension must not be empty".to_string(),
            });
        }

        if self.visualizer.bar_count == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "Visualizer bar count must be > 0".to_string(),
            });
        }

        let (min, max) = (self.visualizer.min_level, self.visualizer.max_level);
        if !(min >= 0.0 && min < max) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("Visualizer levels {}..{} are not an increasing range", min, max),
            });
        }

        if self.visualizer.refresh_interval_ms == 0 || self.visualizer.wave_period_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "Visualizer intervals must be > 0ms".to_string(),
            });
        }

        if self.metrics.histogram_precision > 5 {
            return Err(ConfigError::ValidationFailed {
                reason: format!(
                    "Histogram precision {} out of range 0-5",
                    self.metrics.histogram_precision
                ),
            });
        }

        if self.catalog.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "Catalog must contain at least one recording".to_string(),
            });
        }

        self.caption_track()?;

        Ok(())
    }
}
