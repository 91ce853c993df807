// Library interface for the Adzan player components

pub mod app;
pub mod audio;
pub mod captions;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod state;
pub mod timer;
pub mod ui;
pub mod visualizer;

// Test doubles for the audio seam and the clock
pub mod test_fixtures;

// Re-export commonly used types
pub use captions::{CaptionPair, CaptionTrack};
pub use catalog::{Catalog, PlayableItem};
pub use config::AppConfig;
pub use engine::{PlaybackEngine, PlaybackEvent};
pub use error::{AdzanError, AssetError, Result};
pub use state::{PlaybackSnapshot, PlaybackStatus};
