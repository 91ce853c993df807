//! Owned periodic timer for caption advancement.
//!
//! [`TimerSlot`] holds at most one [`CaptionTimer`]. Starting a timer drops
//! whatever was in the slot, so a stale registration can never deliver a
//! tick into a newer playback session.

use std::time::{Duration, Instant};

/// A running periodic schedule.
#[derive(Debug, Clone)]
pub struct CaptionTimer {
    interval: Duration,
    next_due: Instant,
    generation: u64,
}

impl CaptionTimer {
    fn new(now: Instant, interval: Duration, generation: u64) -> Self {
        Self {
            interval,
            next_due: now + interval,
            generation,
        }
    }

    /// Consume one due tick, if any.
    ///
    /// Returns true when `now` has reached the next scheduled firing. The
    /// schedule then moves forward by exactly one interval, so a caller that
    /// fell behind gets each missed tick on successive calls.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Single-occupancy holder for the caption timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    active: Option<CaptionTimer>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh full-length interval, replacing any running timer.
    ///
    /// Returns the generation number of the new registration.
    pub fn start(&mut self, now: Instant, interval: Duration) -> u64 {
        self.generation += 1;
        if let Some(previous) = self.active.replace(CaptionTimer::new(now, interval, self.generation))
        {
            tracing::debug!(
                replaced = previous.generation(),
                generation = self.generation,
                "Replaced caption timer"
            );
        } else {
            tracing::debug!(generation = self.generation, "Started caption timer");
        }
        self.generation
    }

    /// Release the running timer. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(timer) => {
                tracing::debug!(generation = timer.generation(), "Cancelled caption timer");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the running timer, if any.
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(CaptionTimer::generation)
    }

    /// Total number of timers ever started through this slot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        self.active
            .as_mut()
            .map(|timer| timer.take_due(now))
            .unwrap_or(false)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active.as_ref().map(|timer| timer.remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(3);

    #[test]
    fn test_tick_not_due_before_interval() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.start(start, INTERVAL);

        assert!(!slot.take_due(start));
        assert!(!slot.take_due(start + Duration::from_millis(2999)));
        assert!(slot.take_due(start + INTERVAL));
        assert!(!slot.take_due(start + INTERVAL));
    }

    #[test]
    fn test_missed_ticks_delivered_one_at_a_time() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.start(start, INTERVAL);

        let late = start + Duration::from_secs(10);
        let mut fired = 0;
        while slot.take_due(late) {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(slot.remaining(late), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        let first = slot.start(start, INTERVAL);

        let restart_at = start + Duration::from_secs(2);
        let second = slot.start(restart_at, INTERVAL);

        assert_ne!(first, second);
        assert_eq!(slot.active_generation(), Some(second));
        // The first schedule would have fired at 3s; the replacement waits a full interval.
        assert!(!slot.take_due(start + INTERVAL));
        assert!(slot.take_due(restart_at + INTERVAL));
    }

    #[test]
    fn test_cancel_releases_slot() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.start(start, INTERVAL);

        assert!(slot.cancel());
        assert!(!slot.is_active());
        assert!(!slot.cancel());
        assert!(!slot.take_due(start + INTERVAL * 5));
        assert_eq!(slot.remaining(start), None);
    }
}
