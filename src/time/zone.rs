//! Zone identifier validation, legacy repair and resolution.

use std::sync::OnceLock;

use chrono_tz::Tz;
use regex::Regex;

use super::TimeError;

/// Pattern every stored zone identifier must satisfy (`Region/Place`).
pub const CANONICAL_ZONE_PATTERN: &str = r"^[A-Za-z]+/[A-Za-z0-9_]+$";

static CANONICAL: OnceLock<Option<Regex>> = OnceLock::new();

fn canonical_regex() -> Option<&'static Regex> {
    CANONICAL
        .get_or_init(|| Regex::new(CANONICAL_ZONE_PATTERN).ok())
        .as_ref()
}

/// Check whether `zone_id` has the canonical `Region/Place` shape.
///
/// This is a shape check only; `Mars/Olympus` passes it but does not resolve.
pub fn is_canonical_zone_id(zone_id: &str) -> bool {
    canonical_regex().is_some_and(|re| re.is_match(zone_id))
}

/// Region names as they appear in legacy lowercase identifiers.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("asia", "Asia"),
    ("africa", "Africa"),
    ("americas", "America"),
    ("europe", "Europe"),
    ("oceania", "Australia"),
];

/// Cities that were stored under their own name but share another zone's rules.
const CITY_ALIASES: &[(&str, &str)] = &[("dhaka", "Dhaka"), ("sylhet", "Dhaka")];

fn lookup<'a>(table: &'a [(&str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Repair a loosely formatted zone string into `Region/Place` form.
///
/// Canonical input is returned unchanged. Otherwise the lowercased input is
/// split on `_`: the first word goes through the region alias table and the
/// second through the city alias table. When the second word is not an alias
/// the remaining words are capitalised and joined as the place, so
/// `america_new_york` becomes `America/New_York`. A single-word input is used
/// as both region and place, so `"utc"` becomes `"Utc/Utc"` and will not
/// resolve.
pub fn format_zone_id(raw: &str) -> String {
    if is_canonical_zone_id(raw) {
        return raw.to_string();
    }

    let lowered = raw.trim().to_lowercase();
    let words: Vec<&str> = lowered.split('_').filter(|w| !w.is_empty()).collect();
    let Some((first, rest)) = words.split_first() else {
        return raw.to_string();
    };

    let region = lookup(REGION_ALIASES, first)
        .map(str::to_string)
        .unwrap_or_else(|| capitalize(first));

    let place = match rest.first().or(Some(first)).and_then(|w| lookup(CITY_ALIASES, w)) {
        Some(alias) => alias.to_string(),
        None if rest.is_empty() => capitalize(first),
        None => rest.iter().map(|w| capitalize(w)).collect::<Vec<_>>().join("_"),
    };

    format!("{region}/{place}")
}

/// Resolve an identifier to timezone rules.
///
/// The identifier is tried as given first; the legacy repair in
/// [`format_zone_id`] only runs when that fails.
pub fn resolve_zone(zone_id: &str) -> Result<Tz, TimeError> {
    if let Ok(tz) = zone_id.parse::<Tz>() {
        return Ok(tz);
    }

    let repaired = format_zone_id(zone_id);
    if repaired != zone_id {
        if let Ok(tz) = repaired.parse::<Tz>() {
            tracing::debug!(zone = %zone_id, repaired = %repaired, "Resolved zone through legacy repair");
            return Ok(tz);
        }
    }

    Err(TimeError::InvalidZone(zone_id.to_string()))
}

/// Clean one path segment of a zone name for display (`Los_Angeles` -> `Los Angeles`).
pub fn display_segment(segment: &str) -> String {
    segment.replace('_', " ")
}

/// City and country labels derived from a zone name's last and first segments.
pub fn labels_from_zone_name(zone_name: &str) -> (String, String) {
    let city = zone_name.rsplit('/').next().unwrap_or(zone_name);
    let country = zone_name.split('/').next().unwrap_or(zone_name);
    (display_segment(city), display_segment(country))
}
