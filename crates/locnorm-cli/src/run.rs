//! Batch commands: build brand collections, validate written collections.

use std::path::Path;

use locnorm_core::{BrandCollection, LocnormConfig, Result};
use locnorm_pipeline::files::{discover_jobs, read_collections, write_collection};
use locnorm_pipeline::build_all;
use locnorm_reference::ReferenceDataStore;
use locnorm_validate::{check_collection, validate_collection, write_reports};
use tracing::{error, info};

/// Result of a `run` or `validate` command.
#[derive(Debug, Default)]
pub struct RunReport {
    /// `(brand, locations)` for every brand written or checked.
    pub brands: Vec<(String, usize)>,
    /// `(brand, message)` for every brand that failed.
    pub failed: Vec<(String, String)>,
    pub mismatches: usize,
    pub suspicious: usize,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn validate_into(
    collections: &[BrandCollection],
    refs: &ReferenceDataStore,
    report_dir: &Path,
    report: &mut RunReport,
) -> Result<()> {
    let mut mismatches = Vec::new();
    let mut suspicious = Vec::new();
    for collection in collections {
        mismatches.extend(validate_collection(collection, &refs.bounds));
        suspicious.extend(check_collection(collection, refs));
    }
    report.mismatches = mismatches.len();
    report.suspicious = suspicious.len();
    write_reports(report_dir, &mismatches, &suspicious)
}

/// Build every brand under `input_dir`, write collections and reports to
/// the configured output directory.
pub fn run(input_dir: &Path, config: &LocnormConfig) -> Result<RunReport> {
    let refs = ReferenceDataStore::load(&config.reference)?;
    config.ensure_output_dir()?;

    let jobs = discover_jobs(input_dir)?;
    info!("Processing {} brands from {}", jobs.len(), input_dir.display());

    let mut report = RunReport::default();
    let mut collections = Vec::new();
    for outcome in build_all(&jobs, &refs, config.workers)? {
        match outcome.result {
            Ok(collection) => {
                write_collection(&config.output_dir, &collection)?;
                report
                    .brands
                    .push((collection.key.clone(), collection.locations.len()));
                collections.push(collection);
            }
            Err(e) => {
                error!("Brand '{}' failed: {}", outcome.key, e);
                report.failed.push((outcome.key, e.to_string()));
            }
        }
    }

    validate_into(&collections, &refs, &config.output_dir, &mut report)?;
    Ok(report)
}

/// Re-run both validators over collections already written to `dir`.
pub fn validate_dir(dir: &Path, config: &LocnormConfig) -> Result<RunReport> {
    let refs = ReferenceDataStore::load(&config.reference)?;
    let collections = read_collections(dir)?;
    let mut report = RunReport {
        brands: collections
            .iter()
            .map(|c| (c.key.clone(), c.locations.len()))
            .collect(),
        ..Default::default()
    };
    validate_into(&collections, &refs, dir, &mut report)?;
    Ok(report)
}

/// Print a run report to stdout.
pub fn print_report(report: &RunReport) {
    println!("=== locnorm report ===");
    println!();
    for (brand, count) in &report.brands {
        println!("  {:<24} {:>6} locations", brand, count);
    }
    println!();
    println!("Brands:             {}", report.brands.len());
    println!("Geo mismatches:     {}", report.mismatches);
    println!("Suspicious cities:  {}", report.suspicious);

    if !report.failed.is_empty() {
        println!();
        println!("Failed:");
        for (brand, message) in &report.failed {
            println!("  - {}: {}", brand, message);
        }
    }

    println!();
    if report.is_success() {
        println!("Status: OK");
    } else {
        println!("Status: {} BRAND(S) FAILED", report.failed.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locnorm_validate::{MISMATCH_REPORT, SUSPICIOUS_REPORT};

    const FEATURES: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-73.4257, 40.8682]},
         "properties": {"city": "FORT LEE", "state": "NJ"}}
    ]}"#;

    #[test]
    fn test_run_writes_collections_and_reports() {
        let data = tempfile::tempdir().unwrap();
        let input = data.path().join("raw");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("acme.geojson"), FEATURES).unwrap();
        std::fs::write(input.join("broken.geojson"), "nope").unwrap();

        let config = LocnormConfig::from_env(data.path()).with_output_dir(data.path().join("out"));
        let report = run(&input, &config).unwrap();

        assert_eq!(report.brands, vec![("acme".to_string(), 1)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");
        assert!(!report.is_success());
        assert_eq!(report.mismatches, 1);

        let out = data.path().join("out");
        assert!(out.join("acme.json").exists());
        let mismatches = std::fs::read_to_string(out.join(MISMATCH_REPORT)).unwrap();
        assert!(mismatches.contains("acme,Fort Lee,NJ,NY"));
        assert!(out.join(SUSPICIOUS_REPORT).exists());
    }

    #[test]
    fn test_validate_dir_rechecks_written_output() {
        let data = tempfile::tempdir().unwrap();
        let input = data.path().join("raw");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("acme.geojson"), FEATURES).unwrap();

        let config = LocnormConfig::from_env(data.path()).with_output_dir(data.path().join("out"));
        run(&input, &config).unwrap();
        std::fs::remove_file(data.path().join("out").join(MISMATCH_REPORT)).unwrap();

        let report = validate_dir(&data.path().join("out"), &config).unwrap();
        assert!(report.is_success());
        assert_eq!(report.mismatches, 1);
        assert!(data.path().join("out").join(MISMATCH_REPORT).exists());
    }
}
