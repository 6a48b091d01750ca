//! The runtime's own timezone, read once when seeding an empty list.

use chrono::Utc;

use crate::time::{is_canonical_zone_id, offset_minutes_at, resolve_zone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientZone {
    /// Canonical `Region/Place` name
    pub name: String,
    /// Offset at detection time
    pub offset_minutes: i32,
}

/// Detect the local zone: `TZ` first, then the system setting.
pub fn detect_ambient_zone() -> Option<AmbientZone> {
    let raw = std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| resolve_zone(tz).is_ok())
        .or_else(|| match iana_time_zone::get_timezone() {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system timezone");
                None
            }
        })?;

    let Some(name) = storable_zone_name(&raw) else {
        tracing::warn!(zone = %raw, "Local timezone has no storable name");
        return None;
    };
    let zone = resolve_zone(&name).ok()?;

    Some(AmbientZone {
        offset_minutes: offset_minutes_at(zone, Utc::now()),
        name,
    })
}

/// Map a resolvable zone name onto one that passes the stored-list check.
///
/// `UTC` becomes `Etc/UTC`; deeper names such as
/// `America/Argentina/Buenos_Aires` use their `Region/Place` link when the
/// database has one.
///
/// Names with no storable form (`America/Port-au-Prince` has a `-`) give
/// `None`. Seeding then leaves the list empty on every start, with a warning
/// in the log, rather than store an entry the next load would wipe.
pub fn storable_zone_name(raw: &str) -> Option<String> {
    if is_canonical_zone_id(raw) && resolve_zone(raw).is_ok() {
        return Some(raw.to_string());
    }

    let segments: Vec<&str> = raw.split('/').collect();
    let candidate = match segments.as_slice() {
        [single] => format!("Etc/{single}"),
        [first, .., last] => format!("{first}/{last}"),
        [] => return None,
    };

    (is_canonical_zone_id(&candidate) && candidate.parse::<chrono_tz::Tz>().is_ok())
        .then_some(candidate)
}
