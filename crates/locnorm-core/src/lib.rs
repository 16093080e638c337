//! locnorm core — shared location types, jurisdiction codes, configuration, errors.

pub mod config;
pub mod error;
pub mod jurisdiction;
pub mod types;

pub use config::{LocnormConfig, ReferencePaths};
pub use error::{Error, Result};
pub use jurisdiction::{Country, Jurisdiction};
pub use types::{
    AssemblyStats, BrandCollection, CanonicalLocation, RawRecord, COORD_PRECISION,
    DEDUP_PRECISION,
};
