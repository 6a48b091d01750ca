//! Lookup of candidate locations to add.

use chrono::{DateTime, Utc};

use super::model::TimezoneEntry;
use crate::time::{is_canonical_zone_id, offset_minutes_at, resolve_zone};

/// Source of candidate entries for a free-text query.
///
/// Implementations must hand out canonical zone identifiers.
pub trait Directory: Send + Sync {
    fn search(&self, query: &str, limit: usize) -> Vec<TimezoneEntry>;
}

/// Directory built from the bundled tz database.
///
/// Only `Region/Place` identifiers are offered, so whatever gets added also
/// survives the stored-list check on the next start.
#[derive(Debug, Clone)]
pub struct TzdbDirectory {
    records: Vec<TimezoneEntry>,
}

impl TzdbDirectory {
    pub fn new() -> Self {
        let mut records: Vec<TimezoneEntry> = chrono_tz::TZ_VARIANTS
            .iter()
            .map(|tz| tz.name())
            .filter(|name| is_canonical_zone_id(name))
            .map(|name| TimezoneEntry::from_zone_name(name, 0))
            .collect();
        records.sort_by(|a, b| a.zone_id.cmp(&b.zone_id));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Search with offsets computed at `at` instead of now.
    pub fn search_at(&self, query: &str, limit: usize, at: DateTime<Utc>) -> Vec<TimezoneEntry> {
        let needle = query.trim().to_lowercase();

        let mut ranked: Vec<(u8, &TimezoneEntry)> = self
            .records
            .iter()
            .filter_map(|record| match_rank(record, &needle).map(|rank| (rank, record)))
            .collect();
        ranked.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.zone_id.cmp(&b.zone_id)));

        ranked
            .into_iter()
            .take(limit)
            .filter_map(|(_, record)| {
                let zone = resolve_zone(&record.zone_id).ok()?;
                Some(record.clone().with_offset(offset_minutes_at(zone, at)))
            })
            .collect()
    }
}

impl Default for TzdbDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory for TzdbDirectory {
    fn search(&self, query: &str, limit: usize) -> Vec<TimezoneEntry> {
        self.search_at(query, limit, Utc::now())
    }
}

/// Lower rank sorts first; `None` means no match.
fn match_rank(record: &TimezoneEntry, needle: &str) -> Option<u8> {
    if needle.is_empty() {
        return Some(3);
    }
    let city = record.city.to_lowercase();
    let zone = record.zone_id.to_lowercase();
    let needle_underscored = needle.replace(' ', "_");

    if city == needle {
        Some(0)
    } else if city.starts_with(needle) {
        Some(1)
    } else if city.contains(needle) || zone.contains(&needle_underscored) {
        Some(2)
    } else {
        None
    }
}
