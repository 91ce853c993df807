//! Test doubles for driving the engine without audio hardware
//!
//! [`FakeAssets`] resolves a fixed set of identifiers into probe handles
//! that record every play/pause/stop, and [`ManualClock`] only moves when
//! told to, so caption ticks happen exactly when a test says so.

use crate::audio::{AssetResolver, PlaybackHandle};
use crate::clock::Clock;
use crate::error::AssetError;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Clock that advances only on request. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Everything the probe handles have been asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioLog {
    /// Asset ids passed to `resolve`, including failures
    pub resolve_requests: Vec<String>,
    pub handles_created: usize,
    pub plays: usize,
    pub pauses: usize,
    pub stops: usize,
    /// Handles currently producing (pretend) sound
    pub audible: BTreeSet<usize>,
    /// Handles whose audio has run out
    pub finished: BTreeSet<usize>,
}

/// Shared view of an [`AudioLog`] that outlives the boxed resolver.
#[derive(Debug, Clone, Default)]
pub struct AudioLogHandle(Rc<RefCell<AudioLog>>);

impl AudioLogHandle {
    pub fn snapshot(&self) -> AudioLog {
        self.0.borrow().clone()
    }

    pub fn audible_count(&self) -> usize {
        self.0.borrow().audible.len()
    }

    /// Make the most recently created handle reach the end of its audio.
    pub fn finish_latest(&self) {
        let mut log = self.0.borrow_mut();
        let latest = log.handles_created;
        log.finished.insert(latest);
    }
}

/// Handle that reports to an [`AudioLog`].
#[derive(Debug)]
pub struct ProbeHandle {
    id: usize,
    paused: bool,
    log: AudioLogHandle,
}

impl PlaybackHandle for ProbeHandle {
    fn play(&mut self) {
        self.paused = false;
        let mut log = self.log.0.borrow_mut();
        log.plays += 1;
        log.audible.insert(self.id);
    }

    fn pause(&mut self) {
        self.paused = true;
        let mut log = self.log.0.borrow_mut();
        log.pauses += 1;
        log.audible.remove(&self.id);
    }

    fn stop(&mut self) {
        self.paused = true;
        let mut log = self.log.0.borrow_mut();
        log.stops += 1;
        log.audible.remove(&self.id);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_finished(&self) -> bool {
        self.log.0.borrow().finished.contains(&self.id)
    }
}

/// Resolver over an in-memory set of asset identifiers.
#[derive(Debug, Clone, Default)]
pub struct FakeAssets {
    known: HashSet<String>,
    log: AudioLogHandle,
}

impl FakeAssets {
    pub fn with_assets(ids: &[&str]) -> Self {
        Self {
            known: ids.iter().map(|id| id.to_string()).collect(),
            log: AudioLogHandle::default(),
        }
    }

    pub fn log(&self) -> AudioLogHandle {
        self.log.clone()
    }
}

impl AssetResolver for FakeAssets {
    fn resolve(&mut self, asset_id: &str) -> Result<Box<dyn PlaybackHandle>, AssetError> {
        let mut log = self.log.0.borrow_mut();
        log.resolve_requests.push(asset_id.to_string());

        if !self.known.contains(asset_id) {
            return Err(AssetError::NotFound {
                asset_id: asset_id.to_string(),
                path: PathBuf::from(format!("fake/{}", asset_id)),
            });
        }

        log.handles_created += 1;
        let id = log.handles_created;
        drop(log);

        Ok(Box::new(ProbeHandle {
            id,
            paused: true,
            log: self.log.clone(),
        }))
    }
}
