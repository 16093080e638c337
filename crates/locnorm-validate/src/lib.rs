//! Validation of canonical locations against reference data.
//!
//! Validators never modify locations; they return findings that are written
//! out as CSV reports.

pub mod geo;
pub mod plausibility;
pub mod report;

pub use geo::{validate, validate_collection, GeoMismatch, NO_STATE};
pub use plausibility::{check_city, check_collection, SuspicionReason, SuspiciousCity};
pub use report::{
    write_mismatches, write_reports, write_suspicious, MISMATCH_REPORT, SUSPICIOUS_REPORT,
};
