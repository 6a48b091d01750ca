//! Time engine: the reference instant, per-zone local views and slot windows.
//!
//! Everything here is a pure function of its inputs. Zone rules come from the
//! bundled tz database (`chrono-tz`); nothing is computed by hand beyond
//! shifting instants.

mod engine;
mod slots;
mod zone;

use thiserror::Error;

pub use engine::{
    format_date_label, format_utc_offset, localize, offset_minutes_at, parse_local_datetime,
    ClockFormat, LocalTimeInfo, ReferenceInstant,
};
pub use slots::{generate_slots, selected_index, slots_in_zone, Meridiem, SlotWindow, TimeSlot};
pub use zone::{
    display_segment, format_zone_id, is_canonical_zone_id, labels_from_zone_name, resolve_zone,
    CANONICAL_ZONE_PATTERN,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Unknown timezone: {0}")]
    InvalidZone(String),
    #[error("Not a date or time: {0}")]
    InvalidDateTime(String),
    #[error("{local} does not exist in {zone}")]
    SkippedLocalTime { local: String, zone: String },
}
