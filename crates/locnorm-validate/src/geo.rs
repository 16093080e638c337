//! Bounding-box check of each location's claimed state.

use locnorm_core::{BrandCollection, CanonicalLocation};
use locnorm_reference::BoundsTable;
use serde::Serialize;
use tracing::info;

/// `actual_state` value when no modeled state contains the point.
pub const NO_STATE: &str = "NONE";

/// A location whose coordinates fall outside its claimed state's box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoMismatch {
    pub source: String,
    pub city: String,
    pub claimed_state: String,
    /// States whose boxes contain the point, `;`-joined, or [`NO_STATE`].
    pub actual_state: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

/// Check every location against its state's box. Locations whose state has
/// no box (including empty states) are skipped.
pub fn validate(locations: &[CanonicalLocation], bounds: &BoundsTable) -> Vec<GeoMismatch> {
    locations
        .iter()
        .filter_map(|loc| {
            let bbox = bounds.get(&loc.state)?;
            if bbox.contains(loc.lat, loc.lon) {
                return None;
            }
            let containing = bounds.containing(loc.lat, loc.lon);
            let actual_state = if containing.is_empty() {
                NO_STATE.to_string()
            } else {
                containing.join(";")
            };
            Some(GeoMismatch {
                source: String::new(),
                city: loc.city.clone(),
                claimed_state: loc.state.clone(),
                actual_state,
                lat: loc.lat,
                lon: loc.lon,
                address: loc.address.clone(),
            })
        })
        .collect()
}

/// [`validate`] over one brand, tagging each mismatch with the brand key.
pub fn validate_collection(collection: &BrandCollection, bounds: &BoundsTable) -> Vec<GeoMismatch> {
    let mut mismatches = validate(&collection.locations, bounds);
    for m in &mut mismatches {
        m.source = collection.key.clone();
    }
    info!(
        "Geo check '{}': {} of {} locations outside their state",
        collection.key,
        mismatches.len(),
        collection.locations.len()
    );
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use locnorm_reference::BoundingBox;

    fn table() -> BoundsTable {
        let mut t = BoundsTable::default();
        t.insert("NJ", BoundingBox::new(41.36, 38.93, -73.89, -75.56).unwrap());
        t.insert("NY", BoundingBox::new(45.02, 40.50, -71.85, -79.76).unwrap());
        t.insert("AK", BoundingBox::new(72.0, 51.0, -130.0, 179.0).unwrap());
        t
    }

    #[test]
    fn test_inside_claimed_state_passes() {
        let locs = vec![CanonicalLocation::new(40.85, -73.97, "Fort Lee", "NJ", "")];
        assert!(validate(&locs, &table()).is_empty());
    }

    #[test]
    fn test_mismatch_lists_actual_states() {
        let locs = vec![CanonicalLocation::new(40.8682, -73.4257, "Fort Lee", "NJ", "1 Main St")];
        let found = validate(&locs, &table());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].claimed_state, "NJ");
        assert_eq!(found[0].actual_state, "NY");
        assert_eq!(found[0].address, "1 Main St");
    }

    #[test]
    fn test_overlap_is_sorted_and_joined() {
        // Inside both NJ and NY boxes, claimed AK.
        let locs = vec![CanonicalLocation::new(40.9, -74.0, "Anchorage", "AK", "")];
        let found = validate(&locs, &table());
        assert_eq!(found[0].actual_state, "NJ;NY");
    }

    #[test]
    fn test_none_and_unmapped() {
        let locs = vec![
            CanonicalLocation::new(30.0, -40.0, "Nowhere", "NY", ""),
            CanonicalLocation::new(30.0, -40.0, "Hamilton", "BM", ""),
            CanonicalLocation::new(30.0, -40.0, "", "", ""),
        ];
        let found = validate(&locs, &table());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].actual_state, NO_STATE);
    }

    #[test]
    fn test_antimeridian_box() {
        let locs = vec![
            CanonicalLocation::new(61.0, 179.5, "Adak", "AK", ""),
            CanonicalLocation::new(61.0, -150.0, "Anchorage", "AK", ""),
            CanonicalLocation::new(61.0, 0.0, "Nowhere", "AK", ""),
        ];
        let found = validate(&locs, &table());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].lon, 0.0);
    }
}
