//! locnorm reference — read-only lookup tables shared by every pipeline stage.

pub mod aliases;
pub mod bounds;
pub mod curated;
pub mod overrides;
pub mod store;
pub mod valid_cities;
pub mod zip;

pub use aliases::{AliasLookup, CityAliasTable};
pub use bounds::{BoundingBox, BoundsTable};
pub use curated::CuratedLists;
pub use overrides::OverrideTable;
pub use store::ReferenceDataStore;
pub use valid_cities::ValidCitySet;
pub use zip::{normalize_postal, ZipEntry, ZipIndex};
