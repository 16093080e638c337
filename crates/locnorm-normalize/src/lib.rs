//! locnorm normalize — city cleaning and canonical spelling.

pub mod casing;
pub mod cleaner;
pub mod normalizer;
pub mod rules;

pub use cleaner::clean;
pub use normalizer::{canonicalize, normalize};
