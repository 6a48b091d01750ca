pub mod config;
pub mod data;
pub mod entries;
pub mod time;
pub mod ui;
pub mod util;

pub use config::Config;
pub use data::{
    MemoryStorage, PreferenceStore, Storage, StorageBackend, ThemeMode, TimezoneStore,
};
pub use entries::{identity_key, Directory, EntryList, TimezoneEntry, TzdbDirectory};
pub use time::{format_zone_id, generate_slots, localize, LocalTimeInfo, TimeError, TimeSlot};
pub use ui::App;
