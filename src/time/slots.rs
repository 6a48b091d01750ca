//! Centered windows of selectable time slots.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;

use super::engine::ClockFormat;
use super::zone::resolve_zone;

/// Shape of the slot window shown for every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    /// Number of slots generated
    pub size: usize,
    /// Distance between neighbouring slots
    pub step_minutes: i64,
    /// Index of the slot that represents the reference itself
    pub center: usize,
}

impl SlotWindow {
    pub const DEFAULT_SIZE: usize = 48;
    pub const DEFAULT_STEP_MINUTES: i64 = 30;
    pub const DEFAULT_CENTER: usize = 24;

    pub fn new(size: usize, step_minutes: i64, center: usize) -> Self {
        Self {
            size,
            step_minutes,
            center,
        }
    }

    /// Whether this window can produce a selected slot at all.
    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.step_minutes > 0 && self.center < self.size
    }

    /// Minutes between the reference and slot `index`.
    pub fn shift_minutes(&self, index: usize) -> i64 {
        (index as i64 - self.center as i64) * self.step_minutes
    }
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_SIZE,
            Self::DEFAULT_STEP_MINUTES,
            Self::DEFAULT_CENTER,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// One selectable point in an entry's local calendar. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Local hour, 0-23
    pub hour: u32,
    /// Local minute; 0 or 30 for whole-hour zones on a half-hour reference
    pub minute: u32,
    pub meridiem: Meridiem,
    /// Absolute instant this slot stands for; selecting it makes this the reference
    pub instant: DateTime<Utc>,
    /// Signed step count from the reference
    pub step: i64,
    pub is_selected: bool,
}

impl TimeSlot {
    fn from_local(local: DateTime<Tz>, step: i64) -> Self {
        let (is_pm, _) = local.hour12();
        Self {
            hour: local.hour(),
            minute: local.minute(),
            meridiem: if is_pm { Meridiem::Pm } else { Meridiem::Am },
            instant: local.with_timezone(&Utc),
            step,
            is_selected: step == 0,
        }
    }

    /// Hour within the 12-hour clock (12 for midnight and noon).
    pub fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn label(&self, clock: ClockFormat) -> String {
        match clock {
            ClockFormat::TwelveHour => {
                format!("{}:{:02} {}", self.hour12(), self.minute, self.meridiem.label())
            }
            ClockFormat::TwentyFourHour => format!("{:02}:{:02}", self.hour, self.minute),
        }
    }
}

/// Build the slot window for `zone_id` around `reference`.
///
/// Slot `i` stands for `reference + (i - center) * step`, converted into the
/// zone after shifting, so wall clock gaps around DST transitions show up as
/// they are. Shifts that fall outside the representable range are dropped, and
/// an unresolvable zone gives an empty window. Pure: identical inputs give
/// identical output.
pub fn generate_slots(
    reference: DateTime<Utc>,
    zone_id: &str,
    window: SlotWindow,
) -> Vec<TimeSlot> {
    let zone = match resolve_zone(zone_id) {
        Ok(zone) => zone,
        Err(e) => {
            tracing::warn!(zone = %zone_id, error = %e, "Skipping slot generation");
            return Vec::new();
        }
    };
    slots_in_zone(reference, zone, window)
}

/// [`generate_slots`] for an already resolved zone.
pub fn slots_in_zone(reference: DateTime<Utc>, zone: Tz, window: SlotWindow) -> Vec<TimeSlot> {
    if window.step_minutes <= 0 {
        tracing::warn!(step = window.step_minutes, "Slot step must be positive");
        return Vec::new();
    }

    (0..window.size)
        .filter_map(|index| {
            let step = index as i64 - window.center as i64;
            let shifted = Duration::try_minutes(window.shift_minutes(index))
                .and_then(|delta| reference.checked_add_signed(delta));
            match shifted {
                Some(instant) => Some(TimeSlot::from_local(instant.with_timezone(&zone), step)),
                None => {
                    tracing::debug!(zone = %zone.name(), step, "Slot outside representable range");
                    None
                }
            }
        })
        .collect()
}

/// Index of the selected slot, if the window produced one.
pub fn selected_index(slots: &[TimeSlot]) -> Option<usize> {
    slots.iter().position(|slot| slot.is_selected)
}
