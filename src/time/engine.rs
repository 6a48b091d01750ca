//! Converting the reference instant into each zone's local view.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use super::zone::resolve_zone;
use super::TimeError;

/// The single moment every tracked location is displayed against.
///
/// Stored as an absolute instant; it only changes through [`select`](Self::select),
/// [`shift`](Self::shift) or [`reset_to_now`](Self::reset_to_now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceInstant(DateTime<Utc>);

impl ReferenceInstant {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// User picked a slot or a date; the picked instant becomes the reference.
    pub fn select(&mut self, instant: DateTime<Utc>) {
        self.0 = instant;
    }

    pub fn reset_to_now(&mut self) {
        self.0 = Utc::now();
    }

    /// Move the reference by `minutes`. Out-of-range results leave it unchanged.
    pub fn shift(&mut self, minutes: i64) {
        match self.0.checked_add_signed(Duration::minutes(minutes)) {
            Some(next) => self.0 = next,
            None => tracing::debug!(minutes, "Reference shift out of range, ignored"),
        }
    }
}

impl Default for ReferenceInstant {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for ReferenceInstant {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

/// Wall clock style used for time labels.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockFormat {
    fn pattern(self) -> &'static str {
        match self {
            ClockFormat::TwelveHour => "%-I:%M %p",
            ClockFormat::TwentyFourHour => "%H:%M",
        }
    }

    /// Format a zoned time as a wall clock label.
    pub fn format(self, local: &DateTime<Tz>) -> String {
        local.format(self.pattern()).to_string()
    }
}

/// Local view of the reference instant in one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTimeInfo {
    /// Resolved zone rules
    pub zone: Tz,
    /// The reference instant as a local date-time in `zone`
    pub local: DateTime<Tz>,
    /// Offset from UTC at the reference instant, recomputed on every call
    pub utc_offset_minutes: i32,
    /// "Sat, Oct 18" style calendar label
    pub date_label: String,
    /// Abbreviation as supplied by the timezone database (e.g. "BST", "+06")
    pub abbreviation: String,
}

impl LocalTimeInfo {
    pub fn offset_label(&self) -> String {
        format_utc_offset(self.utc_offset_minutes)
    }

    pub fn time_label(&self, clock: ClockFormat) -> String {
        clock.format(&self.local)
    }
}

/// Convert `reference` into `zone_id`'s local representation.
///
/// An unresolvable zone yields [`TimeError::InvalidZone`]; renderers drop the
/// entry for the current pass instead of failing.
pub fn localize(reference: DateTime<Utc>, zone_id: &str) -> Result<LocalTimeInfo, TimeError> {
    let zone = resolve_zone(zone_id)?;
    let local = reference.with_timezone(&zone);
    let utc_offset_minutes = local.offset().fix().local_minus_utc() / 60;

    Ok(LocalTimeInfo {
        zone,
        utc_offset_minutes,
        date_label: format_date_label(&local),
        abbreviation: local.format("%Z").to_string(),
        local,
    })
}

/// "ccc, MMM d" calendar label, e.g. "Sat, Oct 18".
pub fn format_date_label(local: &DateTime<Tz>) -> String {
    local.format("%a, %b %-d").to_string()
}

/// Render an offset in minutes as `UTC+HH:MM` / `UTC-HH:MM`.
pub fn format_utc_offset(minutes: i32) -> String {
    let sign = if minutes >= 0 { '+' } else { '-' };
    let abs = minutes.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Offset in minutes of `zone` at `instant`.
pub fn offset_minutes_at(zone: Tz, instant: DateTime<Utc>) -> i32 {
    instant.with_timezone(&zone).offset().fix().local_minus_utc() / 60
}

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %I:%M %p"];
const TIME_FORMATS: &[&str] = &["%H:%M", "%I:%M %p"];

/// Read a user-typed wall clock moment in `zone_id`.
///
/// Accepts RFC 3339 (its own offset wins), `YYYY-MM-DD HH:MM`, a bare time
/// (on the date `reference` falls on in the zone) or a bare date (keeping
/// the reference's local time). A time skipped by a DST change is rejected;
/// a repeated one resolves to its earlier occurrence.
pub fn parse_local_datetime(
    input: &str,
    zone_id: &str,
    reference: DateTime<Utc>,
) -> Result<DateTime<Utc>, TimeError> {
    let input = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let zone = resolve_zone(zone_id)?;
    let local_reference = reference.with_timezone(&zone).naive_local();

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f).ok())
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|f| NaiveTime::parse_from_str(input, f).ok())
                .map(|time| local_reference.date().and_time(time))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(local_reference.time()))
        })
        .ok_or_else(|| TimeError::InvalidDateTime(input.to_string()))?;

    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TimeError::SkippedLocalTime {
            local: naive.format("%Y-%m-%d %H:%M").to_string(),
            zone: zone_id.to_string(),
        })
}
