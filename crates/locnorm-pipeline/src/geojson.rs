//! GeoJSON FeatureCollection → raw records.

use std::path::Path;

use locnorm_core::{Error, RawRecord, Result};
use serde_json::Value;
use tracing::debug;

/// Parse a FeatureCollection document. Point geometries give the record
/// coordinates (`[lon, lat]`); any other geometry leaves them unset.
/// Scalar properties become tags; nulls, arrays and objects are dropped.
pub fn parse_feature_collection(json: &str) -> Result<Vec<RawRecord>> {
    let doc: Value = serde_json::from_str(json)
        .map_err(|e| Error::MalformedInput(format!("invalid JSON: {e}")))?;

    if doc.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(Error::MalformedInput(
            "top-level object is not a FeatureCollection".into(),
        ));
    }
    let features = doc
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedInput("FeatureCollection has no features array".into()))?;

    Ok(features.iter().map(feature_to_record).collect())
}

fn feature_to_record(feature: &Value) -> RawRecord {
    let mut record = match point_coordinates(feature) {
        Some((lat, lon)) => RawRecord::new(lat, lon),
        None => RawRecord::without_coordinates(),
    };

    if let Some(props) = feature.get("properties").and_then(Value::as_object) {
        for (key, value) in props {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            record.tags.insert(key.clone(), text);
        }
    }
    record
}

fn point_coordinates(feature: &Value) -> Option<(f64, f64)> {
    let geometry = feature.get("geometry")?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }
    let coords = geometry.get("coordinates")?.as_array()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    Some((lat, lon))
}

/// Read and parse one brand's raw feature file.
pub fn read_feature_file(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_feature_collection(&text)?;
    debug!("Read {} features from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_lon_lat() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature",
             "geometry": {"type": "Point", "coordinates": [-71.1097, 42.3736]},
             "properties": {"addr:full": "100 Main St, Cambridge, MA 02141", "ref": 42,
                            "drive_through": true, "opening_hours": null}}
        ]}"#;
        let records = parse_feature_collection(json).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.coordinates(), Some((42.3736, -71.1097)));
        assert_eq!(r.tag("ref"), Some("42"));
        assert_eq!(r.tag("drive_through"), Some("true"));
        assert!(!r.tags.contains_key("opening_hours"));
    }

    #[test]
    fn test_non_point_geometry_has_no_coordinates() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": []},
             "properties": {"city": "Boston"}},
            {"type": "Feature", "geometry": null, "properties": null}
        ]}"#;
        let records = parse_feature_collection(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.coordinates().is_none()));
        assert_eq!(records[0].tag("city"), Some("Boston"));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            parse_feature_collection("{not json"),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            parse_feature_collection(r#"{"type": "Feature"}"#),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            parse_feature_collection(r#"{"type": "FeatureCollection"}"#),
            Err(Error::MalformedInput(_))
        ));
    }
}
