//! Tracked entries: the model, the ordered list, and where new entries come from.

mod ambient;
mod directory;
mod list;
mod model;

pub use ambient::{detect_ambient_zone, storable_zone_name, AmbientZone};
pub use directory::{Directory, TzdbDirectory};
pub use list::EntryList;
pub use model::{identity_key, TimezoneEntry};
