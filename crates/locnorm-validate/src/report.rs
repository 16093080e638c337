//! CSV reports for validation findings.

use std::io::Write;
use std::path::Path;

use locnorm_core::{Error, Result};
use serde::Serialize;
use tracing::info;

use crate::geo::GeoMismatch;
use crate::plausibility::SuspiciousCity;

pub const MISMATCH_REPORT: &str = "geo_mismatches.csv";
pub const SUSPICIOUS_REPORT: &str = "suspicious_cities.csv";

#[derive(Serialize)]
struct MismatchRow<'a> {
    source: &'a str,
    city: &'a str,
    claimed_state: &'a str,
    actual_state: &'a str,
    lat: f64,
    lon: f64,
    address: &'a str,
}

#[derive(Serialize)]
struct SuspiciousRow<'a> {
    source: &'a str,
    city: &'a str,
    claimed_state: &'a str,
    reasons: String,
    lat: f64,
    lon: f64,
    address: &'a str,
}

fn csv_err(e: csv::Error) -> Error {
    Error::Csv(e.to_string())
}

/// Write the geographic mismatch report. Writes a header even when empty.
pub fn write_mismatches<W: Write>(writer: W, mismatches: &[GeoMismatch]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if mismatches.is_empty() {
        wtr.write_record([
            "source",
            "city",
            "claimed_state",
            "actual_state",
            "lat",
            "lon",
            "address",
        ])
        .map_err(csv_err)?;
    }
    for m in mismatches {
        wtr.serialize(MismatchRow {
            source: &m.source,
            city: &m.city,
            claimed_state: &m.claimed_state,
            actual_state: &m.actual_state,
            lat: m.lat,
            lon: m.lon,
            address: &m.address,
        })
        .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the plausibility report (`reasons` in place of `actual_state`).
pub fn write_suspicious<W: Write>(writer: W, suspicious: &[SuspiciousCity]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if suspicious.is_empty() {
        wtr.write_record([
            "source",
            "city",
            "claimed_state",
            "reasons",
            "lat",
            "lon",
            "address",
        ])
        .map_err(csv_err)?;
    }
    for s in suspicious {
        wtr.serialize(SuspiciousRow {
            source: &s.source,
            city: &s.city,
            claimed_state: &s.claimed_state,
            reasons: s.reasons_label(),
            lat: s.lat,
            lon: s.lon,
            address: &s.address,
        })
        .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both reports into `dir` as `geo_mismatches.csv` and
/// `suspicious_cities.csv`.
pub fn write_reports(
    dir: &Path,
    mismatches: &[GeoMismatch],
    suspicious: &[SuspiciousCity],
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_mismatches(std::fs::File::create(dir.join(MISMATCH_REPORT))?, mismatches)?;
    write_suspicious(std::fs::File::create(dir.join(SUSPICIOUS_REPORT))?, suspicious)?;
    info!(
        "Wrote reports to {} ({} mismatches, {} suspicious cities)",
        dir.display(),
        mismatches.len(),
        suspicious.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plausibility::SuspicionReason;

    #[test]
    fn test_mismatch_csv() {
        let rows = vec![GeoMismatch {
            source: "acme".into(),
            city: "Fort Lee".into(),
            claimed_state: "NJ".into(),
            actual_state: "NY".into(),
            lat: 40.8682,
            lon: -73.4257,
            address: "1 Main St, Suite 2".into(),
        }];
        let mut buf = Vec::new();
        write_mismatches(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("source,city,claimed_state,actual_state,lat,lon,address")
        );
        assert_eq!(
            lines.next(),
            Some("acme,Fort Lee,NJ,NY,40.8682,-73.4257,\"1 Main St, Suite 2\"")
        );
    }

    #[test]
    fn test_empty_reports_have_headers() {
        let mut buf = Vec::new();
        write_suspicious(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            "source,city,claimed_state,reasons,lat,lon,address"
        );
    }

    #[test]
    fn test_write_reports_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let suspicious = vec![SuspiciousCity {
            source: "acme".into(),
            city: "123 Main".into(),
            claimed_state: "NJ".into(),
            reasons: vec![SuspicionReason::NotInReference, SuspicionReason::LeadingDigit],
            lat: 40.9,
            lon: -74.0,
            address: String::new(),
        }];
        write_reports(dir.path(), &[], &suspicious).unwrap();
        let text = std::fs::read_to_string(dir.path().join(SUSPICIOUS_REPORT)).unwrap();
        assert!(text.contains("acme,123 Main,NJ,not_in_reference;leading_digit,40.9,-74.0,"));
        assert!(dir.path().join(MISMATCH_REPORT).exists());
    }
}
