//! Decorative visualizer state.
//!
//! Nothing here looks at the audio signal. Bars jump to random heights on a
//! fixed cadence while playing, and the wave just scrolls its phase.

use crate::config::VisualizerConfig;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::{Duration, Instant};

/// Random bar heights, refreshed on a fixed cadence while playing.
#[derive(Debug, Clone)]
pub struct BarLevels {
    levels: Vec<f32>,
    min: f32,
    max: f32,
    refresh: Duration,
    last_refresh: Option<Instant>,
}

impl BarLevels {
    pub fn new(count: usize, min: f32, max: f32, refresh: Duration) -> Self {
        Self {
            levels: vec![min; count],
            min,
            max,
            refresh,
            last_refresh: None,
        }
    }

    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self::new(
            config.bar_count,
            config.min_level,
            config.max_level,
            config.refresh_interval(),
        )
    }

    /// Re-roll the bars if playing and a refresh is due.
    ///
    /// Returns true when the levels changed. Levels stay frozen while paused.
    pub fn update<R: Rng + ?Sized>(&mut self, now: Instant, is_playing: bool, rng: &mut R) -> bool {
        if !is_playing {
            self.last_refresh = None;
            return false;
        }

        let due = self
            .last_refresh
            .map_or(true, |last| now.saturating_duration_since(last) >= self.refresh);
        if !due {
            return false;
        }

        let (min, max) = (self.min, self.max);
        for level in self.levels.iter_mut() {
            *level = rng.gen_range(min..=max);
        }
        self.last_refresh = Some(now);
        true
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn max_level(&self) -> f32 {
        self.max
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }
}

/// Scrolling phase for the sine-wave style.
#[derive(Debug, Clone)]
pub struct WavePhase {
    phase: f32,
    period: Duration,
    last_update: Option<Instant>,
}

impl WavePhase {
    /// `period` is the time to move a quarter cycle.
    pub fn new(period: Duration) -> Self {
        Self {
            phase: 0.0,
            period,
            last_update: None,
        }
    }

    pub fn update(&mut self, now: Instant, is_playing: bool) {
        if !is_playing {
            self.last_update = None;
            return;
        }

        if let Some(last) = self.last_update {
            let elapsed = now.saturating_duration_since(last).as_secs_f32();
            let quarter_turns = elapsed / self.period.as_secs_f32();
            self.phase = (self.phase - quarter_turns * FRAC_PI_2).rem_euclid(TAU);
        }
        self.last_update = Some(now);
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// One point per unit of width along `mid + sin(2πx/width + phase) * height/3`.
pub fn wave_points(width: f32, height: f32, phase: f32) -> Vec<(f32, f32)> {
    if width <= 0.0 {
        return Vec::new();
    }

    let mid = height / 2.0;
    let steps = width.floor() as usize;
    (0..=steps)
        .map(|step| {
            let x = step as f32;
            let y = mid + (x / width * TAU + phase).sin() * (height / 3.0);
            (x, y)
        })
        .collect()
}
