//! Playback state tracking
//!
//! Explicit state machine for the player plus the read-only snapshot the
//! presentation layer renders from.

use crate::captions::CaptionPair;
use crate::catalog::PlayableItem;
use std::fmt;

/// Explicit playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No item selected yet
    #[default]
    Idle,
    /// Item selected, audio running, captions advancing
    Playing,
    /// Item selected, audio and captions held in place
    Paused,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

impl PlaybackStatus {
    /// Returns true if audio is actively playing
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// State after a play/pause toggle. Idle stays Idle.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }

    /// Get a user-friendly status icon
    pub fn status_icon(&self) -> &'static str {
        match self {
            Self::Idle => "⚪",
            Self::Playing => "▶",
            Self::Paused => "⏸",
        }
    }

    /// Icon for the control that would change this state
    pub fn control_icon(&self) -> &'static str {
        match self {
            Self::Playing => "⏸",
            Self::Idle | Self::Paused => "▶",
        }
    }

    /// Get a user-friendly status message
    pub fn status_message(&self) -> String {
        match self {
            Self::Idle => "Choose an Adzan".to_string(),
            Self::Playing => "Playing".to_string(),
            Self::Paused => "Paused".to_string(),
        }
    }
}

/// Point-in-time copy of the engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_item: Option<PlayableItem>,
    pub status: PlaybackStatus,
    pub caption_index: usize,
    pub caption: CaptionPair,
    pub timer_active: bool,
}

impl PlaybackSnapshot {
    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn has_active_item(&self) -> bool {
        self.current_item.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(PlaybackStatus::Playing.is_playing());
        assert!(!PlaybackStatus::Paused.is_playing());
        assert!(!PlaybackStatus::Idle.is_playing());
    }

    #[test]
    fn test_toggle_transitions() {
        assert_eq!(PlaybackStatus::Playing.toggled(), PlaybackStatus::Paused);
        assert_eq!(PlaybackStatus::Paused.toggled(), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::Idle.toggled(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PlaybackStatus::Idle.to_string(), "Idle");
        assert_eq!(PlaybackStatus::default(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_icons() {
        assert_eq!(PlaybackStatus::Playing.status_icon(), "▶");
        assert_eq!(PlaybackStatus::Playing.control_icon(), "⏸");
        assert_eq!(PlaybackStatus::Paused.control_icon(), "▶");
    }
}
