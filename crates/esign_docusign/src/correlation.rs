//! Bidirectional correlation between internal envelope ids and DocuSign
//! envelope ids.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Maps {
    by_internal: HashMap<Uuid, String>,
    by_external: HashMap<String, Uuid>,
}

/// Two-way id table behind a single lock.
///
/// Pairs are inserted and removed together, so readers never see one
/// direction without the other. Each internal id maps to at most one external
/// id and vice versa. The table lives in memory only.
#[derive(Debug, Default)]
pub struct EnvelopeIdIndex {
    maps: RwLock<Maps>,
}

impl EnvelopeIdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds consistent maps: every write completes
    // both sides before it can panic.
    fn read(&self) -> RwLockReadGuard<'_, Maps> {
        self.maps.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Maps> {
        self.maps.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Records `internal <-> external`, evicting any pair that shares either side.
    pub fn insert(&self, internal: Uuid, external: impl Into<String>) {
        let external = external.into();
        let mut maps = self.write();
        if let Some(old_external) = maps.by_internal.remove(&internal) {
            maps.by_external.remove(&old_external);
        }
        if let Some(old_internal) = maps.by_external.remove(&external) {
            maps.by_internal.remove(&old_internal);
        }
        maps.by_internal.insert(internal, external.clone());
        maps.by_external.insert(external, internal);
    }

    pub fn external_id(&self, internal: &Uuid) -> Option<String> {
        self.read().by_internal.get(internal).cloned()
    }

    pub fn internal_id(&self, external: &str) -> Option<Uuid> {
        self.read().by_external.get(external).copied()
    }

    /// Removes the pair containing `internal`; returns the external id it held.
    pub fn remove(&self, internal: &Uuid) -> Option<String> {
        let mut maps = self.write();
        let external = maps.by_internal.remove(internal)?;
        maps.by_external.remove(&external);
        Some(external)
    }

    pub fn len(&self) -> usize {
        self.read().by_internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
