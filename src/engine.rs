//! Playback and caption synchronization engine.
//!
//! The engine is the single owner of "what is playing and which caption is
//! shown". It is driven from one thread: commands (`play`,
//! `toggle_play_pause`) and `poll` all take `&mut self`, so a command can
//! never interleave with a tick. Caption timing follows the wall clock, not
//! the audio position; if the audio device starts late the captions do not
//! wait for it.

use crate::audio::{AssetResolver, PlaybackHandle};
use crate::captions::{CaptionPair, CaptionTrack};
use crate::catalog::PlayableItem;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::metrics::PlaybackMetrics;
use crate::state::{PlaybackSnapshot, PlaybackStatus};
use crate::timer::TimerSlot;
use std::time::Duration;

/// Caption interval used when nothing else is configured.
pub const DEFAULT_CAPTION_INTERVAL: Duration = Duration::from_secs(3);

pub type SubscriptionId = u64;

/// Notifications delivered to subscribers after each state change.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A new item started from the first caption
    Started { item: PlayableItem },
    Paused { index: usize },
    Resumed { index: usize },
    CaptionAdvanced { index: usize },
    /// A tick arrived on the last caption; the timer is released
    TrackFinished,
    /// The audio itself ran out while the item was playing
    AudioFinished,
    /// `play` was rejected; nothing else changed
    PlayFailed { asset_id: String },
}

type Listener = Box<dyn FnMut(&PlaybackEvent)>;

pub struct PlaybackEngine<C: Clock = SystemClock> {
    resolver: Box<dyn AssetResolver>,
    clock: C,
    captions: CaptionTrack,
    interval: Duration,

    current_item: Option<PlayableItem>,
    handle: Option<Box<dyn PlaybackHandle>>,
    audio_finished: bool,
    status: PlaybackStatus,
    caption_index: usize,
    timer: TimerSlot,

    metrics: PlaybackMetrics,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl PlaybackEngine<SystemClock> {
    pub fn with_system_clock(
        resolver: Box<dyn AssetResolver>,
        captions: CaptionTrack,
        interval: Duration,
    ) -> Self {
        Self::new(resolver, SystemClock, captions, interval)
    }
}

impl<C: Clock> PlaybackEngine<C> {
    pub fn new(
        resolver: Box<dyn AssetResolver>,
        clock: C,
        captions: CaptionTrack,
        interval: Duration,
    ) -> Self {
        Self {
            resolver,
            clock,
            captions,
            interval,
            current_item: None,
            handle: None,
            audio_finished: false,
            status: PlaybackStatus::Idle,
            caption_index: 0,
            timer: TimerSlot::new(),
            metrics: PlaybackMetrics::new(),
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn with_metrics(mut self, metrics: PlaybackMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Start `item` from its first caption.
    ///
    /// On a resolve failure nothing changes: whatever was playing keeps
    /// playing and the caption index and timer are untouched. On success the
    /// previous audio is stopped, the caption index returns to 0, and the
    /// caption timer is replaced with a fresh one.
    pub fn play(&mut self, item: &PlayableItem) -> Result<()> {
        let asset_id = item.audio_asset_id();

        let resolve_started = self.clock.now();
        let resolved = self.resolver.resolve(asset_id);
        self.metrics
            .record_resolve(self.clock.now().saturating_duration_since(resolve_started));

        let mut handle = match resolved {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(
                    asset_id,
                    item = item.display_name(),
                    error = %e,
                    "Failed to play"
                );
                self.metrics.record_failed_play();
                self.notify(PlaybackEvent::PlayFailed {
                    asset_id: asset_id.to_string(),
                });
                return Err(e.into());
            }
        };

        if let Some(mut previous) = self.handle.take() {
            previous.stop();
        }
        handle.play();
        self.handle = Some(handle);
        self.audio_finished = false;

        self.current_item = Some(item.clone());
        self.status = PlaybackStatus::Playing;
        self.caption_index = 0;

        let now = self.clock.now();
        let generation = self.timer.start(now, self.interval);
        self.metrics.record_play(now);

        tracing::info!(
            item = item.display_name(),
            asset_id,
            generation,
            "Playback started"
        );
        self.notify(PlaybackEvent::Started { item: item.clone() });
        Ok(())
    }

    /// Presentation-layer name for [`PlaybackEngine::play`].
    pub fn select_and_play(&mut self, item: &PlayableItem) -> Result<()> {
        self.play(item)
    }

    /// Pause or resume the current item.
    ///
    /// Pausing freezes the caption index. Resuming keeps that index and
    /// waits a full interval before the next advance; time already spent on
    /// the caption before the pause is not credited. Without a loaded item
    /// this does nothing.
    pub fn toggle_play_pause(&mut self) -> PlaybackStatus {
        let Some(handle) = self.handle.as_mut() else {
            tracing::debug!("Toggle ignored: nothing loaded");
            self.metrics.record_ignored_toggle();
            return self.status;
        };

        let now = self.clock.now();
        let index = self.caption_index;
        match self.status {
            PlaybackStatus::Playing => {
                handle.pause();
                self.status = PlaybackStatus::Paused;
                self.timer.cancel();
                self.metrics.record_pause(now);
                tracing::info!(index, "Playback paused");
                self.notify(PlaybackEvent::Paused { index });
            }
            PlaybackStatus::Paused => {
                handle.play();
                self.status = PlaybackStatus::Playing;
                let generation = self.timer.start(now, self.interval);
                self.metrics.record_resume(now);
                tracing::info!(index, generation, "Playback resumed");
                self.notify(PlaybackEvent::Resumed { index });
            }
            PlaybackStatus::Idle => {}
        }
        self.status
    }

    /// Deliver every tick that is due by now, oldest first.
    ///
    /// Also notices when the audio has drained. That is reported once per
    /// item and leaves status and captions alone.
    /// Returns the number of ticks handled.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while self.status.is_playing() && self.timer.take_due(now) {
            fired += 1;
            self.on_tick();
        }
        self.check_audio_finished();
        fired
    }

    fn check_audio_finished(&mut self) {
        if self.audio_finished || !self.status.is_playing() {
            return;
        }
        let drained = self.handle.as_ref().is_some_and(|handle| handle.is_finished());
        if drained {
            self.audio_finished = true;
            tracing::debug!(index = self.caption_index, "Audio finished");
            self.notify(PlaybackEvent::AudioFinished);
        }
    }

    fn on_tick(&mut self) {
        self.metrics.record_tick();

        if self.caption_index < self.captions.last_index() {
            self.caption_index += 1;
            tracing::trace!(index = self.caption_index, "Caption advanced");
            self.notify(PlaybackEvent::CaptionAdvanced {
                index: self.caption_index,
            });
        } else {
            self.timer.cancel();
            tracing::debug!(index = self.caption_index, "Caption track finished");
            self.notify(PlaybackEvent::TrackFinished);
        }
    }

    /// Register a callback for every subsequent [`PlaybackEvent`].
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: PlaybackEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Captions for the current index, empty strings if out of range.
    pub fn current_caption_pair(&self) -> CaptionPair {
        self.captions.pair_or_default(self.caption_index)
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn has_active_item(&self) -> bool {
        self.current_item.is_some()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn caption_index(&self) -> usize {
        self.caption_index
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.current_item.as_ref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True once the current item's audio has played to its end.
    pub fn is_audio_finished(&self) -> bool {
        self.audio_finished
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.is_active()
    }

    /// Number of caption timers started over the engine's lifetime.
    pub fn timers_started(&self) -> u64 {
        self.timer.generation()
    }

    /// Time until the next tick is due, if a timer is running.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    pub fn metrics(&self) -> &PlaybackMetrics {
        &self.metrics
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_item: self.current_item.clone(),
            status: self.status,
            caption_index: self.caption_index,
            caption: self.current_caption_pair(),
            timer_active: self.timer.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{FakeAssets, ManualClock};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine_with(clock: &ManualClock) -> PlaybackEngine<ManualClock> {
        PlaybackEngine::new(
            Box::new(FakeAssets::with_assets(&["mekkah"])),
            clock.clone(),
            CaptionTrack::adzan(),
            DEFAULT_CAPTION_INTERVAL,
        )
    }

    #[test]
    fn test_initial_state() {
        let clock = ManualClock::new();
        let engine = engine_with(&clock);

        assert_eq!(engine.status(), PlaybackStatus::Idle);
        assert_eq!(engine.caption_index(), 0);
        assert!(!engine.has_active_item());
        assert!(!engine.has_active_timer());
        assert_eq!(engine.time_until_next_tick(), None);
    }

    #[test]
    fn test_poll_without_timer_is_noop() {
        let clock = ManualClock::new();
        let mut engine = engine_with(&clock);

        clock.advance(Duration::from_secs(30));
        assert_eq!(engine.poll(), 0);
        assert_eq!(engine.caption_index(), 0);
    }

    #[test]
    fn test_time_until_next_tick_counts_down() {
        let clock = ManualClock::new();
        let mut engine = engine_with(&clock);
        let item = PlayableItem::new("Adzan Mekkah", "Mekkah", "mekkah");

        engine.play(&item).unwrap();
        clock.advance(Duration::from_secs(1));
        assert_eq!(engine.time_until_next_tick(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_events_in_order() {
        let clock = ManualClock::new();
        let mut engine = engine_with(&clock);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let item = PlayableItem::new("Adzan Mekkah", "Mekkah", "mekkah");
        engine.play(&item).unwrap();
        clock.advance(DEFAULT_CAPTION_INTERVAL);
        engine.poll();
        engine.toggle_play_pause();

        assert_eq!(
            *events.borrow(),
            vec![
                PlaybackEvent::Started { item: item.clone() },
                PlaybackEvent::CaptionAdvanced { index: 1 },
                PlaybackEvent::Paused { index: 1 },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let clock = ManualClock::new();
        let mut engine = engine_with(&clock);
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = engine.subscribe(move |_| *counter.borrow_mut() += 1);

        let item = PlayableItem::new("Adzan Mekkah", "Mekkah", "mekkah");
        engine.play(&item).unwrap();
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.toggle_play_pause();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let clock = ManualClock::new();
        let mut engine = engine_with(&clock);
        let item = PlayableItem::new("Adzan Mekkah", "Mekkah", "mekkah");
        engine.play(&item).unwrap();

        let snapshot = engine.snapshot();
        assert!(snapshot.is_playing());
        assert!(snapshot.has_active_item());
        assert!(snapshot.timer_active);
        assert_eq!(snapshot.caption.transliterated, "Allahu Akbar, Allahu Akbar");
    }
}
