//! locnorm extract — best-effort (city, state, address) recovery from raw POI tags.

pub mod extractor;
pub mod strategy;
pub mod text;

pub use extractor::{Extraction, Extractor, FieldSources, FieldStrategy, PartialFields};
