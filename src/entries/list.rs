//! Ordered, deduplicated list of tracked entries.
//!
//! Every mutation consumes the list and returns the next one, so the owner
//! replaces its state wholesale and persists the result.

use serde::{Deserialize, Serialize};

use super::ambient::{detect_ambient_zone, AmbientZone};
use super::model::{identity_key, TimezoneEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<TimezoneEntry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimezoneEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimezoneEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[TimezoneEntry] {
        &self.entries
    }

    /// Index of the entry with this identity key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| identity_key(e) == key)
    }

    pub fn contains(&self, entry: &TimezoneEntry) -> bool {
        self.position(&identity_key(entry)).is_some()
    }

    /// Append `entry` unless its identity is already tracked.
    ///
    /// A duplicate is a silent no-op, not an error.
    pub fn add(mut self, entry: TimezoneEntry) -> Self {
        if self.contains(&entry) {
            tracing::debug!(key = %identity_key(&entry), "Entry already tracked");
            return self;
        }
        tracing::debug!(key = %identity_key(&entry), "Adding entry");
        self.entries.push(entry);
        self
    }

    /// Remove the first entry with the same identity as `entry`.
    pub fn remove(mut self, entry: &TimezoneEntry) -> Self {
        if let Some(index) = self.position(&identity_key(entry)) {
            let removed = self.entries.remove(index);
            tracing::debug!(key = %identity_key(&removed), index, "Removed entry");
        }
        self
    }

    /// Relocate the entry at `from` to `to`, shifting the ones in between.
    ///
    /// Out-of-range indices leave the list unchanged.
    pub fn move_entry(mut self, from: usize, to: usize) -> Self {
        let len = self.entries.len();
        if from >= len || to >= len {
            tracing::debug!(from, to, len, "Ignoring move with out-of-range index");
            return self;
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        self
    }

    /// Move the entry identified by `from_key` to where `to_key` currently sits.
    pub fn reorder(self, from_key: &str, to_key: &str) -> Self {
        if from_key == to_key {
            return self;
        }
        match (self.position(from_key), self.position(to_key)) {
            (Some(from), Some(to)) => self.move_entry(from, to),
            _ => {
                tracing::debug!(from = %from_key, to = %to_key, "Reorder target not found");
                self
            }
        }
    }

    /// Drop every entry. The next start reseeds from the ambient zone.
    pub fn clear(mut self) -> Self {
        self.entries.clear();
        self
    }

    /// One-entry list for the runtime's own zone; empty if it cannot be detected.
    pub fn seed_default() -> Self {
        match detect_ambient_zone() {
            Some(ambient) => Self::seed_default_from(&ambient),
            None => {
                tracing::warn!("Could not detect local timezone, starting with an empty list");
                Self::new()
            }
        }
    }

    pub fn seed_default_from(ambient: &AmbientZone) -> Self {
        Self::new().add(TimezoneEntry::from_zone_name(
            &ambient.name,
            ambient.offset_minutes,
        ))
    }

    /// Seed from the ambient zone only when nothing is tracked.
    pub fn ensure_seeded(self) -> Self {
        if self.is_empty() {
            Self::seed_default()
        } else {
            self
        }
    }
}

impl From<Vec<TimezoneEntry>> for EntryList {
    /// Builds through [`EntryList::add`], so duplicates collapse to their first occurrence.
    fn from(entries: Vec<TimezoneEntry>) -> Self {
        entries.into_iter().fold(Self::new(), Self::add)
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a TimezoneEntry;
    type IntoIter = std::slice::Iter<'a, TimezoneEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
