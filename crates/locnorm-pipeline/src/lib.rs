//! Record assembly pipeline — extract, clean, normalize, filter, dedup.
//!
//! Turns a brand's raw scraped records into a sorted, deduplicated
//! [`BrandCollection`](locnorm_core::BrandCollection) of canonical locations.

pub mod assembler;
pub mod brand;
pub mod files;
pub mod geojson;
pub mod types;

pub use assembler::RecordAssembler;
pub use brand::{build_all, build_collection, BrandOutcome};
pub use types::*;
