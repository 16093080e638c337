//! Raw scraped records, canonical locations, and brand collections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decimal digits kept on emitted coordinates (~0.1m).
pub const COORD_PRECISION: u32 = 6;

/// Decimal digits used for the duplicate-location key (~10m).
pub const DEDUP_PRECISION: u32 = 4;

/// One scraped POI feature: optional coordinates plus free-form tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            tags: HashMap::new(),
        }
    }

    /// A record without geometry.
    pub fn without_coordinates() -> Self {
        Self::default()
    }

    /// Builder-style tag insertion.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Tag value, trimmed; `None` when absent or blank.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-blank tag among `keys`, in priority order.
    pub fn first_tag(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.tag(k))
    }

    /// Coordinates when both are present, finite and in range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if is_valid_coordinate(lat, lon) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// True when lat/lon are finite and inside [-90,90] / [-180,180].
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

/// Round to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Integer key for a coordinate pair rounded to `digits` decimals.
#[allow(clippy::cast_possible_truncation)]
pub fn coordinate_key(lat: f64, lon: f64, digits: u32) -> (i64, i64) {
    let factor = 10f64.powi(digits as i32);
    ((lat * factor).round() as i64, (lon * factor).round() as i64)
}

/// Canonical, validated location record. Empty string means "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalLocation {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

impl CanonicalLocation {
    /// Build a location, rounding coordinates to [`COORD_PRECISION`].
    pub fn new(
        lat: f64,
        lon: f64,
        city: impl Into<String>,
        state: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            lat: round_to(lat, COORD_PRECISION),
            lon: round_to(lon, COORD_PRECISION),
            city: city.into(),
            state: state.into(),
            address: address.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }
}

/// Summary of one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    #[serde(rename = "inputRecords")]
    pub input_records: usize,
    #[serde(rename = "missingCoordinates")]
    pub missing_coordinates: usize,
    #[serde(rename = "outsideNorthAmerica")]
    pub outside_north_america: usize,
    #[serde(rename = "placeholders")]
    pub placeholders: usize,
    #[serde(rename = "duplicates")]
    pub duplicates: usize,
    #[serde(rename = "locations")]
    pub locations: usize,
    #[serde(rename = "withState")]
    pub with_state: usize,
    #[serde(rename = "withCity")]
    pub with_city: usize,
    #[serde(rename = "withAddress")]
    pub with_address: usize,
}

impl AssemblyStats {
    fn pct(&self, count: usize) -> f64 {
        if self.locations == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.locations as f64
        }
    }

    pub fn state_pct(&self) -> f64 {
        self.pct(self.with_state)
    }

    pub fn city_pct(&self) -> f64 {
        self.pct(self.with_city)
    }

    pub fn address_pct(&self) -> f64 {
        self.pct(self.with_address)
    }
}

/// All canonical locations for one brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCollection {
    pub key: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub category: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    pub stats: AssemblyStats,
    pub locations: Vec<CanonicalLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_skips_blank() {
        let record = RawRecord::new(40.0, -74.0)
            .with_tag("addr:city", "  ")
            .with_tag("city", " Hoboken ");
        assert_eq!(record.tag("addr:city"), None);
        assert_eq!(record.first_tag(&["addr:city", "city"]), Some("Hoboken"));
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(RawRecord::new(40.0, -74.0).coordinates().is_some());
        assert!(RawRecord::new(91.0, -74.0).coordinates().is_none());
        assert!(RawRecord::new(f64::NAN, -74.0).coordinates().is_none());
        assert!(RawRecord::without_coordinates().coordinates().is_none());
    }

    #[test]
    fn test_coordinate_key_collapses_nearby_points() {
        let a = coordinate_key(40.00001, -74.00001, DEDUP_PRECISION);
        let b = coordinate_key(40.00004, -74.00002, DEDUP_PRECISION);
        assert_eq!(a, b);
        assert_ne!(a, coordinate_key(40.0001, -74.0, DEDUP_PRECISION));
    }

    #[test]
    fn test_canonical_location_rounds_and_serializes() {
        let loc = CanonicalLocation::new(42.36251234, -71.0841999, "Cambridge", "MA", "");
        assert_eq!(loc.lat, 42.362512);
        assert_eq!(loc.lon, -71.0842);
        let json = serde_json::to_value(&loc).unwrap();
        assert!(json.get("displayName").is_none());
        assert_eq!(json["city"], "Cambridge");
    }

    #[test]
    fn test_stats_percentages() {
        let stats = AssemblyStats {
            locations: 4,
            with_city: 3,
            ..Default::default()
        };
        assert_eq!(stats.city_pct(), 75.0);
        assert_eq!(AssemblyStats::default().state_pct(), 0.0);
    }
}
