//! Error types for the Adzan player.
//!
//! Every failure in this crate is local to the operation that raised it:
//! nothing here tears down the engine, and the UI shows `user_message()`
//! for anything the listener should see.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all player operations.
#[derive(Error, Debug)]
pub enum AdzanError {
    /// Audio asset could not be resolved into a playable handle
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Audio output device errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Caption track construction errors
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures resolving a bundled audio asset.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Audio asset '{asset_id}' not found at '{}'", .path.display())]
    NotFound { asset_id: String, path: PathBuf },

    #[error("Failed to open audio asset '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode audio asset '{asset_id}': {reason}")]
    DecodeFailed { asset_id: String, reason: String },
}

/// Audio output errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio output available: {reason}")]
    OutputUnavailable { reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptionError {
    #[error("Caption lines misaligned: {source_len} source lines, {transliterated_len} transliterated lines")]
    LengthMismatch {
        source_len: usize,
        transliterated_len: usize,
    },

    #[error("Caption track has no lines")]
    Empty,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file '{}': {source}", .path.display())]
    LoadFailed {
        path: Box<PathBuf>,
        source: std::io::Error,
    },

    #[error("Invalid config format in '{}': {source}", .path.display())]
    InvalidFormat {
        path: Box<PathBuf>,
        source: toml::de::Error,
    },

    #[error("Config validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to save config to '{}': {source}", .path.display())]
    SaveFailed {
        path: Box<PathBuf>,
        source: std::io::Error,
    },

    #[error("Config serialization failed: {source}")]
    SerializationFailed { source: toml::ser::Error },
}

/// Result type alias for player operations
pub type Result<T, E = AdzanError> = std::result::Result<T, E>;

impl AssetError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AssetError::NotFound { asset_id, .. } => {
                format!("Audio '{}' is missing from the bundle", asset_id)
            }
            AssetError::Unreadable { path, .. } => {
                format!("Could not open '{}'", path.display())
            }
            AssetError::DecodeFailed { asset_id, .. } => {
                format!("Audio '{}' could not be played", asset_id)
            }
        }
    }
}

impl AdzanError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AdzanError::Asset(e) => e.user_message(),
            AdzanError::Audio(_) => "Audio output is unavailable".to_string(),
            AdzanError::Caption(_) => "Caption text is misconfigured".to_string(),
            AdzanError::Config(_) => "Settings could not be applied".to_string(),
            AdzanError::Io(_) => "A file operation failed".to_string(),
        }
    }

    /// Returns true if this is the asset-not-found condition
    pub fn is_asset_not_found(&self) -> bool {
        matches!(self, AdzanError::Asset(AssetError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssetError::NotFound {
            asset_id: "mekkah".to_string(),
            path: PathBuf::from("assets/mekkah.mp3"),
        };
        assert!(err.to_string().contains("mekkah"));
        assert!(err.to_string().contains("assets/mekkah.mp3"));
    }

    #[test]
    fn test_user_messages() {
        let err: AdzanError = AssetError::NotFound {
            asset_id: "madinah".to_string(),
            path: PathBuf::from("assets/madinah.mp3"),
        }
        .into();
        let msg = err.user_message();
        assert!(msg.contains("madinah"));
        assert!(!msg.contains("Error")); // User-friendly, not technical
        assert!(err.is_asset_not_found());
    }

    #[test]
    fn test_caption_error_display() {
        let err = CaptionError::LengthMismatch {
            source_len: 8,
            transliterated_len: 7,
        };
        assert!(err.to_string().contains('8'));
        assert!(err.to_string().contains('7'));
    }
}
