//! Persistence adapter around [`ChallengeEngine`].
//!
//! The session reads the store once when opened and writes the full snapshot
//! after every intent that changed something. Store failures are logged and
//! swallowed: the in-memory engine stays authoritative for the session.

use chrono::{DateTime, Utc};

use crate::challenge::{ChallengeEngine, ChallengeState, TaskKey};
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::{Config, SnapshotStore, PENDING_SLOT, SNAPSHOT_SLOT};

pub struct ChallengeSession<S: SnapshotStore> {
    store: S,
    engine: ChallengeEngine,
    clock: Clock,
}

impl<S: SnapshotStore> ChallengeSession<S> {
    /// Restore the challenge from `store`, or start fresh.
    pub fn open(store: S, config: &Config, clock: Clock) -> Self {
        let raw = store.load(SNAPSHOT_SLOT).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read challenge snapshot, starting fresh");
            None
        });
        let restored = ChallengeState::restore(raw.as_deref());
        let state = restored.unwrap_or_default();
        let mut engine = ChallengeEngine::with_celebration(state, config.celebration_delay());
        if let Some(until) = load_pending(&store) {
            // A deadline only belongs to a restored, fully checked day.
            if restored.is_some_and(|s| s.is_day_complete()) {
                engine.resume_pending(until);
            } else {
                tracing::warn!(%until, "dropping pending advance without a completed day");
                if let Err(e) = store.clear(PENDING_SLOT) {
                    tracing::warn!(error = %e, "failed to clear pending advance");
                }
            }
        }
        tracing::debug!(day = state.day, strikes = state.strikes, "challenge session opened");
        Self {
            store,
            engine,
            clock,
        }
    }

    pub fn engine(&self) -> &ChallengeEngine {
        &self.engine
    }

    pub fn state(&self) -> &ChallengeState {
        self.engine.state()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn toggle(&mut self, key: TaskKey) -> Option<Event> {
        let event = self.engine.toggle(key);
        self.persist_if(event.is_some());
        event
    }

    /// End the current day using the session clock.
    pub fn complete_day(&mut self) -> Option<Event> {
        let today = self.clock.today();
        let now = self.clock.now();
        let event = self.engine.complete_day(today, now);
        self.persist_if(event.is_some());
        event
    }

    /// Apply a pending advance whose deadline has passed.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick(self.clock.now());
        self.persist_if(event.is_some());
        event
    }

    pub fn finish_pending(&mut self) -> Option<Event> {
        let event = self.engine.finish_pending();
        self.persist_if(event.is_some());
        event
    }

    /// Reset unconditionally. Callers gate this behind a confirmation.
    pub fn reset_progress(&mut self) -> Option<Event> {
        let event = self.engine.reset_progress();
        self.persist_if(event.is_some());
        event
    }

    fn persist_if(&self, changed: bool) {
        if changed {
            self.persist();
        }
    }

    /// Write the snapshot and the pending-advance slot. The deadline is only
    /// stored next to a snapshot that was written successfully.
    pub fn persist(&self) {
        let saved = match self.engine.state().to_snapshot() {
            Ok(raw) => match self.store.save(SNAPSHOT_SLOT, &raw) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to save challenge snapshot");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize challenge snapshot");
                false
            }
        };

        let pending = match self.engine.pending_until() {
            Some(until) if saved => self.store.save(PENDING_SLOT, &until.to_rfc3339()),
            _ => self.store.clear(PENDING_SLOT),
        };
        if let Err(e) = pending {
            tracing::warn!(error = %e, "failed to save pending advance");
        }
    }
}

fn load_pending<S: SnapshotStore>(store: &S) -> Option<DateTime<Utc>> {
    let raw = match store.load(PENDING_SLOT) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read pending advance");
            return None;
        }
    };
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(until) => Some(until.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(error = %e, value = %raw, "ignoring unreadable pending advance");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::TaskBoard;
    use crate::error::{CoreError, Result};
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn clock() -> Clock {
        Clock::fixed(Utc.with_ymd_and_hms(2026, 10, 18, 18, 30, 0).unwrap())
    }

    fn saved_state(store: &MemoryStore) -> ChallengeState {
        ChallengeState::try_from_snapshot(&store.get(SNAPSHOT_SLOT).unwrap()).unwrap()
    }

    #[test]
    fn empty_store_starts_fresh_without_writing() {
        let store = MemoryStore::new();
        let session = ChallengeSession::open(&store, &Config::default(), clock());
        assert_eq!(*session.state(), ChallengeState::default());
        assert!(store.get(SNAPSHOT_SLOT).is_none());
    }

    #[test]
    fn every_intent_is_persisted() {
        let store = MemoryStore::new();
        let mut session = ChallengeSession::open(&store, &Config::default(), clock());
        session.toggle(TaskKey::Water);
        assert!(saved_state(&store).tasks.is_done(TaskKey::Water));

        session.complete_day();
        assert_eq!(saved_state(&store).strikes, 1);

        session.reset_progress();
        assert_eq!(saved_state(&store), ChallengeState::default());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_default() {
        let store = MemoryStore::with_slot(SNAPSHOT_SLOT, "{{{ not json");
        let session = ChallengeSession::open(&store, &Config::default(), clock());
        assert_eq!(*session.state(), ChallengeState::default());
    }

    #[test]
    fn pending_advance_survives_reopen() {
        let store = MemoryStore::new();
        let start = ChallengeState {
            day: 4,
            tasks: TaskBoard::all_done(),
            ..ChallengeState::default()
        };
        store.save(SNAPSHOT_SLOT, &start.to_snapshot().unwrap()).unwrap();

        let mut session = ChallengeSession::open(&store, &Config::default(), clock());
        assert!(matches!(session.complete_day(), Some(Event::DayCompleted { .. })));
        assert!(store.get(PENDING_SLOT).is_some());
        drop(session);

        let mut later = clock();
        later.advance(Duration::seconds(5));
        let mut session = ChallengeSession::open(&store, &Config::default(), later);
        assert!(session.engine().is_pending());
        assert_eq!(session.tick(), Some(Event::DayAdvanced { day: 5, strikes: 0 }));
        assert!(store.get(PENDING_SLOT).is_none());
        assert_eq!(saved_state(&store).day, 5);
    }

    #[test]
    fn ignored_intents_do_not_write() {
        let store = MemoryStore::new();
        let mut session = ChallengeSession::open(&store, &Config::default(), clock());
        assert!(session.tick().is_none());
        assert!(session.finish_pending().is_none());
        assert!(store.get(SNAPSHOT_SLOT).is_none());
    }

    #[test]
    fn pending_slot_without_snapshot_is_dropped() {
        let deadline = "2026-10-18T18:30:02+00:00";
        for snapshot in [None, Some("{{ corrupt")] {
            let store = MemoryStore::new();
            if let Some(raw) = snapshot {
                store.save(SNAPSHOT_SLOT, raw).unwrap();
            }
            store.save(PENDING_SLOT, deadline).unwrap();

            let mut later = clock();
            later.advance(Duration::seconds(10));
            let mut session = ChallengeSession::open(&store, &Config::default(), later);
            assert!(!session.engine().is_pending());
            assert!(session.tick().is_none());
            assert_eq!(*session.state(), ChallengeState::default());
            assert!(store.get(PENDING_SLOT).is_none());
        }
    }

    #[test]
    fn pending_slot_for_unfinished_day_is_dropped() {
        let store = MemoryStore::new();
        let unfinished = ChallengeState {
            day: 6,
            ..ChallengeState::default()
        };
        store.save(SNAPSHOT_SLOT, &unfinished.to_snapshot().unwrap()).unwrap();
        store.save(PENDING_SLOT, "2026-10-18T18:30:02+00:00").unwrap();

        let mut session = ChallengeSession::open(&store, &Config::default(), clock());
        assert!(!session.engine().is_pending());
        assert!(session.finish_pending().is_none());
        assert_eq!(session.state().day, 6);
    }

    /// Rejects snapshot writes, accepts everything else.
    struct SnapshotWriteFails(MemoryStore);

    impl SnapshotStore for SnapshotWriteFails {
        fn load(&self, slot: &str) -> Result<Option<String>> {
            self.0.load(slot)
        }
        fn save(&self, slot: &str, value: &str) -> Result<()> {
            if slot == SNAPSHOT_SLOT {
                return Err(CoreError::Custom("disk full".into()));
            }
            self.0.save(slot, value)
        }
        fn clear(&self, slot: &str) -> Result<()> {
            self.0.clear(slot)
        }
    }

    #[test]
    fn deadline_is_not_stored_without_its_snapshot() {
        let store = SnapshotWriteFails(MemoryStore::new());
        let ready = ChallengeState {
            tasks: TaskBoard::all_done(),
            ..ChallengeState::default()
        };
        store.0.save(SNAPSHOT_SLOT, &ready.to_snapshot().unwrap()).unwrap();

        let mut session = ChallengeSession::open(&store, &Config::default(), clock());
        assert!(matches!(session.complete_day(), Some(Event::DayCompleted { .. })));
        assert!(session.engine().is_pending());
        assert!(store.0.get(PENDING_SLOT).is_none());
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self, _slot: &str) -> Result<Option<String>> {
            Err(CoreError::Custom("disk unplugged".into()))
        }
        fn save(&self, _slot: &str, _value: &str) -> Result<()> {
            Err(CoreError::Custom("disk unplugged".into()))
        }
        fn clear(&self, _slot: &str) -> Result<()> {
            Err(CoreError::Custom("disk unplugged".into()))
        }
    }

    #[test]
    fn store_failures_are_not_fatal() {
        let mut session = ChallengeSession::open(FailingStore, &Config::default(), clock());
        assert_eq!(*session.state(), ChallengeState::default());
        session.toggle(TaskKey::KindnessTask);
        assert!(session.state().tasks.is_done(TaskKey::KindnessTask));
    }
}
