//! Data persistence layer for worldtimez
//!
//! Persisted state is a handful of string values under fixed keys, kept in a
//! SQLite key/value table (or in memory for ephemeral runs).

mod app_state;
mod database;
mod migrations;
mod preferences;
mod storage;
mod timezone_store;

pub use app_state::AppStateStore;
pub use database::{Database, DatabaseError};
pub use preferences::{PreferenceStore, ThemeMode, THEME_KEY};
pub use storage::{MemoryStorage, Storage, StorageBackend, StorageError};
pub use timezone_store::{StoreError, TimezoneStore, TIMEZONES_KEY};
