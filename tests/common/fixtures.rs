//! Deterministic inputs for tests.

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use worldtimez::data::{AppStateStore, Database};
use worldtimez::TimezoneEntry;

/// Fixed reference instant (2024-07-15 12:00:00 UTC, northern summer)
pub const TEST_INSTANT: &str = "2024-07-15T12:00:00Z";

pub fn test_instant() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(TEST_INSTANT)
        .expect("Invalid test instant")
        .with_timezone(&Utc)
}

pub fn london() -> TimezoneEntry {
    TimezoneEntry::new("Europe/London", "London", "United Kingdom")
        .with_display_name("London")
        .with_population(8_900_000)
}

pub fn dhaka() -> TimezoneEntry {
    TimezoneEntry::new("Asia/Dhaka", "Dhaka", "Bangladesh").with_offset(360)
}

pub fn tokyo() -> TimezoneEntry {
    TimezoneEntry::new("Asia/Tokyo", "Tokyo", "Japan").with_offset(540)
}

/// SQLite-backed key/value store in a temporary directory
pub fn temp_store() -> (AppStateStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(dir.path().join("test.db")).expect("Failed to open database");
    (db.store(), dir)
}
