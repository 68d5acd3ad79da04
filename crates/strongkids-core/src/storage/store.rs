use std::cell::RefCell;
use std::collections::HashMap;

use super::Database;
use crate::error::Result;

/// Slot holding the serialized [`crate::ChallengeState`].
pub const SNAPSHOT_SLOT: &str = "75StrongKids";
/// Slot holding the RFC 3339 deadline of a pending day advance.
pub const PENDING_SLOT: &str = "pending_advance";

/// Named-slot persistence used by [`crate::ChallengeSession`].
pub trait SnapshotStore {
    fn load(&self, slot: &str) -> Result<Option<String>>;
    fn save(&self, slot: &str, value: &str) -> Result<()>;
    fn clear(&self, slot: &str) -> Result<()>;
}

impl SnapshotStore for Database {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        self.kv_get(slot)
    }

    fn save(&self, slot: &str, value: &str) -> Result<()> {
        self.kv_set(slot, value)
    }

    fn clear(&self, slot: &str) -> Result<()> {
        self.kv_delete(slot)
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one slot.
    pub fn with_slot(slot: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        store
    }

    pub fn get(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.get(slot))
    }

    fn save(&self, slot: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, slot: &str) -> Result<()> {
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        (**self).load(slot)
    }

    fn save(&self, slot: &str, value: &str) -> Result<()> {
        (**self).save(slot, value)
    }

    fn clear(&self, slot: &str) -> Result<()> {
        (**self).clear(slot)
    }
}
