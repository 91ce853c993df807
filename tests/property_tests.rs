//! Randomized command sequences against the engine invariants.

use adzan_player::captions::CaptionTrack;
use adzan_player::catalog::PlayableItem;
use adzan_player::engine::{PlaybackEngine, DEFAULT_CAPTION_INTERVAL};
use adzan_player::state::PlaybackStatus;
use adzan_player::test_fixtures::{FakeAssets, ManualClock};
use proptest::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Command {
    PlayKnown(usize),
    PlayMissing,
    Toggle,
    Wait(u64),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0usize..2).prop_map(Command::PlayKnown),
        Just(Command::PlayMissing),
        Just(Command::Toggle),
        (0u64..10_000).prop_map(Command::Wait),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(commands in prop::collection::vec(command(), 1..60)) {
        let assets = FakeAssets::with_assets(&["mekkah", "cianjur"]);
        let audio = assets.log();
        let clock = ManualClock::new();
        let track = CaptionTrack::adzan();
        let last = track.last_index();
        let mut engine = PlaybackEngine::new(
            Box::new(assets),
            clock.clone(),
            track,
            DEFAULT_CAPTION_INTERVAL,
        );
        let items = [
            PlayableItem::new("Adzan Mekkah", "Mekkah", "mekkah"),
            PlayableItem::new("Adzan Cianjur", "Cianjur", "cianjur"),
        ];
        let missing = PlayableItem::new("Adzan Madinah", "Madinah", "madinah");

        for cmd in commands {
            let before = engine.snapshot();
            match cmd {
                Command::PlayKnown(i) => {
                    prop_assert!(engine.play(&items[i]).is_ok());
                    prop_assert_eq!(engine.caption_index(), 0);
                    prop_assert_eq!(engine.status(), PlaybackStatus::Playing);
                }
                Command::PlayMissing => {
                    prop_assert!(engine.play(&missing).is_err());
                    prop_assert_eq!(engine.snapshot(), before);
                }
                Command::Toggle => {
                    engine.toggle_play_pause();
                    prop_assert_eq!(engine.caption_index(), before.caption_index);
                    prop_assert_eq!(engine.status(), before.status.toggled());
                }
                Command::Wait(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    engine.poll();
                    prop_assert!(engine.caption_index() >= before.caption_index);
                }
            }

            prop_assert!(engine.caption_index() <= last);
            if engine.has_active_timer() {
                prop_assert!(engine.is_playing());
            }
            if engine.is_playing() && engine.caption_index() < last {
                prop_assert!(engine.has_active_timer());
            }
            if !engine.has_active_item() {
                prop_assert!(!engine.is_playing());
                prop_assert_eq!(engine.status(), PlaybackStatus::Idle);
            }
            prop_assert_eq!(audio.audible_count(), usize::from(engine.is_playing()));
        }
    }

    #[test]
    fn out_of_range_caption_lookup_is_empty(index in 8usize..usize::MAX) {
        let track = CaptionTrack::adzan();
        prop_assert!(track.pair(index).is_none());
        prop_assert_eq!(track.pair_or_default(index).source, "");
    }
}
