//! Per-state city alias table.
//!
//! Maps a raw city spelling to its canonical form, or to `null` when the raw
//! value is known not to be a city at all (a county, a metro nickname, a
//! scraper placeholder). The `*` state applies to every jurisdiction.

use locnorm_core::{Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Wildcard state key applying to all jurisdictions.
pub const ANY_STATE: &str = "*";

/// Result of an alias lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasLookup<'a> {
    /// Known alias with its canonical spelling.
    Canonical(&'a str),
    /// Known non-city; the field must be emptied.
    Invalid,
    /// Not in the table.
    Unmapped,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct AliasFile(HashMap<String, HashMap<String, Option<String>>>);

#[derive(Debug, Clone, Default)]
pub struct CityAliasTable {
    /// state → lowercased raw city → canonical (None = not a city).
    entries: HashMap<String, HashMap<String, Option<String>>>,
    /// state → canonical values.
    canonical: HashMap<String, HashSet<String>>,
}

impl CityAliasTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: AliasFile = serde_json::from_str(json)
            .map_err(|e| Error::Reference(format!("city aliases: {e}")))?;

        let mut table = Self::default();
        for (state, rows) in file.0 {
            let state = state.trim().to_ascii_uppercase();
            for (raw, canonical) in rows {
                table.insert(&state, &raw, canonical);
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, state: &str, raw: &str, canonical: Option<String>) {
        if let Some(value) = &canonical {
            self.canonical
                .entry(state.to_string())
                .or_default()
                .insert(value.clone());
        }
        self.entries
            .entry(state.to_string())
            .or_default()
            .insert(raw.trim().to_lowercase(), canonical);
    }

    /// Case-insensitive lookup; the state's own rows win over wildcard rows.
    pub fn lookup(&self, state: &str, raw: &str) -> AliasLookup<'_> {
        let key = raw.trim().to_lowercase();
        [state, ANY_STATE]
            .iter()
            .filter_map(|s| self.entries.get(*s))
            .find_map(|rows| rows.get(&key))
            .map_or(AliasLookup::Unmapped, |hit| match hit {
                Some(canonical) => AliasLookup::Canonical(canonical.as_str()),
                None => AliasLookup::Invalid,
            })
    }

    /// True when `city` is exactly a canonical alias value for `state`.
    pub fn is_canonical(&self, state: &str, city: &str) -> bool {
        self.canonical
            .get(state)
            .is_some_and(|values| values.contains(city))
    }

    /// Every `(state, canonical)` pair the table can produce.
    pub fn canonical_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.canonical
            .iter()
            .flat_map(|(state, values)| values.iter().map(move |v| (state.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "*": { "Unknown": null },
        "MD": { "Beltsville Prince George": null },
        "ny": { "Kings": "Brooklyn" }
    }"#;

    #[test]
    fn test_lookup_variants() {
        let table = CityAliasTable::from_json(SAMPLE).unwrap();
        assert_eq!(
            table.lookup("MD", "beltsville prince george"),
            AliasLookup::Invalid
        );
        assert_eq!(table.lookup("NY", "KINGS"), AliasLookup::Canonical("Brooklyn"));
        assert_eq!(table.lookup("NY", "Queens"), AliasLookup::Unmapped);
        assert_eq!(table.lookup("TX", " unknown "), AliasLookup::Invalid);
    }

    #[test]
    fn test_alias_is_state_scoped() {
        let table = CityAliasTable::from_json(SAMPLE).unwrap();
        assert_eq!(table.lookup("NJ", "Kings"), AliasLookup::Unmapped);
        assert!(table.is_canonical("NY", "Brooklyn"));
        assert!(!table.is_canonical("NY", "brooklyn"));
    }

    #[test]
    fn test_bad_json_is_reference_error() {
        assert!(matches!(
            CityAliasTable::from_json("[1, 2]"),
            Err(Error::Reference(_))
        ));
    }
}
