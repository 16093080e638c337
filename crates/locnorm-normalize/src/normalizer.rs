//! Canonical city spelling per jurisdiction.
//!
//! `normalize` is a pure function of `(city, state)` and the reference
//! store. Order of precedence: an alias result is final; an override row
//! beats the general rewrite rules.

use crate::casing::repair_case;
use crate::cleaner::clean;
use crate::rules::{apostrophes, formal_titles, general_rules};
use locnorm_reference::{AliasLookup, ReferenceDataStore};
use tracing::debug;

/// Map a cleaned city string to its canonical display form.
pub fn normalize(city: &str, state: &str, refs: &ReferenceDataStore) -> String {
    let city = city.trim();
    if city.is_empty() {
        return String::new();
    }
    if refs.aliases.is_canonical(state, city) || refs.overrides.is_canonical(state, city) {
        return city.to_string();
    }

    let city = repair_case(city, &refs.curated);

    match refs.aliases.lookup(state, &city) {
        AliasLookup::Invalid => return String::new(),
        AliasLookup::Canonical(canonical) => return canonical.to_string(),
        AliasLookup::Unmapped => {}
    }

    let city = formal_titles(&city, state, &refs.curated);
    if let Some(fixed) = refs.overrides.lookup(state, &city) {
        return fixed.to_string();
    }

    let city = general_rules(&city, &refs.curated);
    if let Some(fixed) = refs.overrides.lookup(state, &city) {
        return fixed.to_string();
    }

    apostrophes(&city)
}

/// `city` is already a name the reference data vouches for in `state`.
fn is_known_city(city: &str, state: &str, refs: &ReferenceDataStore) -> bool {
    refs.aliases.is_canonical(state, city)
        || refs.overrides.is_canonical(state, city)
        || refs.valid_cities.contains(city, state)
}

/// Raw extracted city → canonical city.
///
/// The raw string is checked against the alias table before cleaning, so a
/// non-city such as `Beltsville Prince George` is dropped rather than cleaned
/// into something that looks valid. Known cities skip cleaning, so a name
/// ending in a county name (`Prince Frederick`) keeps its last word.
pub fn canonicalize(raw: &str, state: &str, refs: &ReferenceDataStore) -> String {
    match refs.aliases.lookup(state, raw) {
        AliasLookup::Invalid => {
            debug!("Alias table rejects city {:?} in {}", raw, state);
            return String::new();
        }
        AliasLookup::Canonical(canonical) => return canonical.to_string(),
        AliasLookup::Unmapped => {}
    }
    let raw = raw.trim();
    if is_known_city(raw, state, refs) {
        return normalize(raw, state, refs);
    }
    normalize(&clean(raw, &refs.curated), state, refs)
}
