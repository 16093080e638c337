//! The reference data store: every lookup table, loaded once and shared
//! read-only by all pipeline stages.

use crate::aliases::CityAliasTable;
use crate::bounds::BoundsTable;
use crate::curated::CuratedLists;
use crate::overrides::OverrideTable;
use crate::valid_cities::ValidCitySet;
use crate::zip::ZipIndex;
use locnorm_core::{ReferencePaths, Result};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

const BUILTIN_ALIASES: &str = include_str!("../data/city_aliases.json");
const BUILTIN_BOUNDS: &str = include_str!("../data/state_bounds.csv");
const BUILTIN_SUPPLEMENT: &str = include_str!("../data/valid_cities_supplement.json");
const BUILTIN_OVERRIDES: &str = include_str!("../data/city_overrides.json");
const BUILTIN_CURATED: &str = include_str!("../data/curated_lists.json");

/// Immutable lookup tables. `Send + Sync`; share by reference across threads.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataStore {
    pub zips: ZipIndex,
    pub aliases: CityAliasTable,
    pub bounds: BoundsTable,
    pub valid_cities: ValidCitySet,
    pub curated: CuratedLists,
    pub overrides: OverrideTable,
}

/// Read `path` if it exists, else fall back to the embedded copy.
fn read_or_builtin(path: &Path, builtin: &'static str) -> Result<String> {
    if path.is_file() {
        info!("Loading reference file {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    } else {
        Ok(builtin.to_string())
    }
}

impl ReferenceDataStore {
    /// Embedded tables only, with an empty zip index.
    pub fn builtin() -> Result<Self> {
        Self::assemble(
            ZipIndex::new(),
            BUILTIN_ALIASES,
            BUILTIN_BOUNDS,
            BUILTIN_SUPPLEMENT,
            BUILTIN_OVERRIDES,
            BUILTIN_CURATED,
        )
    }

    /// Load from a reference directory. Missing files fall back to the
    /// embedded defaults; the zip table has none and stays empty.
    pub fn load(paths: &ReferencePaths) -> Result<Self> {
        let zips = if paths.zip_codes.is_file() {
            info!("Loading zip table {}", paths.zip_codes.display());
            ZipIndex::from_reader(File::open(&paths.zip_codes)?)?
        } else {
            warn!(
                "No zip table at {}; postal lookups and plausibility checks are disabled",
                paths.zip_codes.display()
            );
            ZipIndex::new()
        };

        let store = Self::assemble(
            zips,
            &read_or_builtin(&paths.city_aliases, BUILTIN_ALIASES)?,
            &read_or_builtin(&paths.state_bounds, BUILTIN_BOUNDS)?,
            &read_or_builtin(&paths.valid_cities_supplement, BUILTIN_SUPPLEMENT)?,
            &read_or_builtin(&paths.city_overrides, BUILTIN_OVERRIDES)?,
            &read_or_builtin(&paths.curated_lists, BUILTIN_CURATED)?,
        )?;

        info!(
            "Reference data ready: {} postal codes, {} aliases, {} boxes, {} valid cities, {} overrides",
            store.zips.len(),
            store.aliases.len(),
            store.bounds.len(),
            store.valid_cities.len(),
            store.overrides.len()
        );
        Ok(store)
    }

    fn assemble(
        zips: ZipIndex,
        aliases: &str,
        bounds: &str,
        supplement: &str,
        overrides: &str,
        curated: &str,
    ) -> Result<Self> {
        let mut valid_cities = ValidCitySet::from_zip_index(&zips);
        valid_cities.add_supplement_json(supplement)?;
        Ok(Self {
            aliases: CityAliasTable::from_json(aliases)?,
            bounds: BoundsTable::from_csv_reader(bounds.as_bytes())?,
            valid_cities,
            curated: CuratedLists::from_json(curated)?,
            overrides: OverrideTable::from_json(overrides)?,
            zips,
        })
    }

    /// Build from already-constructed tables.
    pub fn from_parts(
        zips: ZipIndex,
        aliases: CityAliasTable,
        bounds: BoundsTable,
        valid_cities: ValidCitySet,
        curated: CuratedLists,
        overrides: OverrideTable,
    ) -> Self {
        Self {
            zips,
            aliases,
            bounds,
            valid_cities,
            curated,
            overrides,
        }
    }

    /// Builtin tables plus the given zip rows; convenient for tests.
    pub fn builtin_with_zips(zips: ZipIndex) -> Result<Self> {
        Self::assemble(
            zips,
            BUILTIN_ALIASES,
            BUILTIN_BOUNDS,
            BUILTIN_SUPPLEMENT,
            BUILTIN_OVERRIDES,
            BUILTIN_CURATED,
        )
    }
}
