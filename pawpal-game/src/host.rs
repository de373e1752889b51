//! In-process host implementations for native runs, tests, and the tester.
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::intent::Notice;
use crate::snapshot::{PetSnapshot, SnapshotError};
use crate::view::RenderView;
use crate::{Clock, PetStorage, PetView, Ticker, TimerKind};

/// Wall clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or_default()
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    pub fn set_ms(&self, now_ms: i64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

#[derive(Debug, Error)]
pub enum MemoryStorageError {
    #[error("stored snapshot unreadable: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Key-value store holding serialized JSON records, like browser storage.
/// Clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    /// Store a raw record, bypassing the snapshot codec.
    pub fn put_raw(&self, key: &str, raw: &str) {
        self.records
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    /// Number of successful saves since creation or the last
    /// [`Self::clear_writes`].
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn clear_writes(&self) {
        self.writes.set(0);
    }
}

impl PetStorage for MemoryStorage {
    type Error = MemoryStorageError;

    fn save_pet(&self, key: &str, snapshot: &PetSnapshot) -> Result<(), Self::Error> {
        let json = snapshot.to_json()?;
        self.records.borrow_mut().insert(key.to_string(), json);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load_pet(&self, key: &str) -> Result<Option<PetSnapshot>, Self::Error> {
        match self.records.borrow().get(key) {
            Some(raw) => Ok(Some(PetSnapshot::from_json(raw)?)),
            None => Ok(None),
        }
    }

    fn delete_pet(&self, key: &str) -> Result<(), Self::Error> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

/// Timer bookkeeping without real scheduling; the driver fires timers itself.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    running: BTreeMap<TimerKind, u32>,
    starts: usize,
}

impl ManualTicker {
    #[must_use]
    pub fn period(&self, kind: TimerKind) -> Option<u32> {
        self.running.get(&kind).copied()
    }

    /// How many times any schedule has been (re)started.
    #[must_use]
    pub const fn starts(&self) -> usize {
        self.starts
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, kind: TimerKind, period_ms: u32) {
        self.running.insert(kind, period_ms);
        self.starts += 1;
    }

    fn stop(&mut self, kind: TimerKind) {
        self.running.remove(&kind);
    }

    fn is_running(&self, kind: TimerKind) -> bool {
        self.running.contains_key(&kind)
    }
}

/// View that records every call for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub renders: Vec<RenderView>,
    pub notices: Vec<Notice>,
    pub selection_shown: usize,
}

impl RecordingView {
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderView> {
        self.renders.last()
    }
}

impl PetView for RecordingView {
    fn render(&mut self, view: &RenderView) {
        self.renders.push(view.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn show_species_selection(&mut self) {
        self.selection_shown += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAVE_KEY;
    use crate::pet::Pet;
    use crate::species::Species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn memory_storage_round_trips_through_json() {
        let storage = MemoryStorage::default();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let pet = Pet::new(Species::Cat, Some("Nori"), 1_000, &mut rng);
        let snapshot = PetSnapshot::capture(&pet);
        storage.save_pet(SAVE_KEY, &snapshot).unwrap();
        assert_eq!(storage.writes(), 1);
        assert!(storage.get_raw(SAVE_KEY).unwrap().contains("\"name\":\"Nori\""));
        assert_eq!(storage.load_pet(SAVE_KEY).unwrap(), Some(snapshot));
        storage.delete_pet(SAVE_KEY).unwrap();
        assert_eq!(storage.load_pet(SAVE_KEY).unwrap(), None);
    }

    #[test]
    fn clones_share_state() {
        let clock = ManualClock::new(10);
        let other = clock.clone();
        other.advance_ms(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set_ms(3);
        assert_eq!(other.now_ms(), 3);
    }

    #[test]
    fn ticker_tracks_schedules() {
        let mut ticker = ManualTicker::default();
        ticker.start(TimerKind::Tick, 1_000);
        ticker.start(TimerKind::Tick, 500);
        assert_eq!(ticker.period(TimerKind::Tick), Some(500));
        assert_eq!(ticker.starts(), 2);
        ticker.stop(TimerKind::Tick);
        assert!(!ticker.is_running(TimerKind::Tick));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 1_600_000_000_000);
    }
}
