//! Tracked location model

use serde::{Deserialize, Serialize};

use crate::time::labels_from_zone_name;

/// A tracked location.
///
/// Field names on the wire match the stored list format
/// (`id`, `name`, `city`, `country`, `population`, `offset`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimezoneEntry {
    /// Canonical `Region/Place` zone identifier
    #[serde(rename = "id")]
    pub zone_id: String,
    /// Human label, may differ from the identifier
    #[serde(rename = "name", default)]
    pub display_name: String,
    pub city: String,
    pub country: String,
    /// Informational only, never used for ordering
    #[serde(default)]
    pub population: u64,
    /// Offset when the entry was added. Display fallback only; the live
    /// offset is always recomputed from `zone_id`.
    #[serde(rename = "offset", default)]
    pub utc_offset_minutes: i32,
}

impl TimezoneEntry {
    pub fn new(
        zone_id: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let zone_id = zone_id.into();
        Self {
            display_name: zone_id.clone(),
            zone_id,
            city: city.into(),
            country: country.into(),
            population: 0,
            utc_offset_minutes: 0,
        }
    }

    /// Entry whose labels are derived from the zone name itself
    /// (`America/Los_Angeles` -> city "Los Angeles", country "America").
    pub fn from_zone_name(zone_name: &str, utc_offset_minutes: i32) -> Self {
        let (city, country) = labels_from_zone_name(zone_name);
        Self::new(zone_name, city, country).with_offset(utc_offset_minutes)
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Identity used for dedup, lookup and reordering.
    pub fn identity_key(&self) -> String {
        identity_key(self)
    }

    /// "Country/City" heading shown on the entry's row.
    pub fn location_label(&self) -> String {
        format!("{}/{}", self.country, self.city)
    }
}

/// `zone_id + "_" + city`: same zone under two city labels is two entries.
pub fn identity_key(entry: &TimezoneEntry) -> String {
    format!("{}_{}", entry.zone_id, entry.city)
}
