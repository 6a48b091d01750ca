//! Persisted entry list with validate-or-wipe loading.
//!
//! The list is stored whole, as one JSON array under [`TIMEZONES_KEY`]. On
//! load, a document that fails to parse, or any entry whose `id` is not a
//! canonical `Region/Place` identifier, discards the whole stored list. One
//! bad legacy entry therefore costs the user every saved entry; the caller
//! then starts over from an empty list and reseeds.

use thiserror::Error;

use super::storage::{StorageBackend, StorageError};
use crate::entries::{EntryList, TimezoneEntry};
use crate::time::is_canonical_zone_id;

/// Storage key of the serialized entry list.
pub const TIMEZONES_KEY: &str = "worldtimez_timezones";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Stored timezone list is corrupt: {reason}")]
    Corrupt { reason: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reads and writes the entry list through a [`StorageBackend`].
#[derive(Debug, Clone)]
pub struct TimezoneStore<B> {
    backend: B,
}

impl<B: StorageBackend> TimezoneStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the stored list, telling a missing list apart from a corrupt one.
    ///
    /// Does not modify storage.
    pub fn load_checked(&self) -> Result<EntryList, StoreError> {
        let Some(raw) = self.backend.get(TIMEZONES_KEY)? else {
            return Ok(EntryList::new());
        };

        let entries: Vec<TimezoneEntry> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                reason: e.to_string(),
            })?;

        if let Some(bad) = entries.iter().find(|e| !is_canonical_zone_id(&e.zone_id)) {
            return Err(StoreError::Corrupt {
                reason: format!("invalid zone id {:?}", bad.zone_id),
            });
        }

        Ok(EntryList::from(entries))
    }

    /// Load the stored list; a corrupt list is wiped from storage and an
    /// empty list returned. Never fails.
    pub fn load(&self) -> EntryList {
        match self.load_checked() {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Loaded timezone list");
                list
            }
            Err(StoreError::Corrupt { reason }) => {
                tracing::warn!(%reason, "Discarding stored timezone list");
                self.wipe();
                EntryList::new()
            }
            Err(StoreError::Storage(e)) => {
                tracing::warn!(error = %e, "Failed to read stored timezone list");
                EntryList::new()
            }
        }
    }

    /// Persist the whole list. Failures are logged and swallowed; the
    /// in-memory list stays authoritative.
    pub fn save(&self, list: &EntryList) {
        let json = match serde_json::to_string(list) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize timezone list");
                return;
            }
        };
        match self.backend.set(TIMEZONES_KEY, &json) {
            Ok(()) => tracing::debug!(count = list.len(), "Saved timezone list"),
            Err(e) => tracing::warn!(error = %e, "Failed to save timezone list"),
        }
    }

    /// Startup path: load, and when nothing usable is stored, seed from the
    /// ambient zone and persist the seed.
    pub fn load_or_seed(&self) -> EntryList {
        let list = self.load();
        if !list.is_empty() {
            return list;
        }
        let seeded = list.ensure_seeded();
        if !seeded.is_empty() {
            self.save(&seeded);
        }
        seeded
    }

    /// Remove the stored list entirely.
    pub fn wipe(&self) {
        if let Err(e) = self.backend.remove(TIMEZONES_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored timezone list");
        }
    }
}
