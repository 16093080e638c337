//! Curated word lists used by the extractor, cleaner, normalizer and
//! plausibility validator.
//!
//! The lists ship as `data/curated_lists.json` and are compiled into
//! lookup-friendly sets on load. Matching is case-insensitive throughout.

use locnorm_core::{Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Deserialize)]
struct PlaceholderRow {
    city: String,
    state: String,
}

#[derive(Debug, Deserialize)]
struct CuratedFile {
    #[serde(default)]
    protected_compounds: Vec<String>,
    #[serde(default)]
    county_names: Vec<String>,
    #[serde(default)]
    repeated_word_cities: Vec<String>,
    #[serde(default)]
    bare_prefixes: Vec<String>,
    #[serde(default)]
    lodging_keywords: Vec<String>,
    #[serde(default)]
    noise_suffixes: Vec<String>,
    #[serde(default)]
    placeholders: Vec<PlaceholderRow>,
    #[serde(default)]
    url_filler_tokens: Vec<String>,
    #[serde(default)]
    generic_name_words: Vec<String>,
    #[serde(default)]
    saint_jurisdictions: Vec<String>,
    #[serde(default)]
    joined_names: HashMap<String, String>,
    #[serde(default)]
    general_misspellings: HashMap<String, String>,
    #[serde(default)]
    truncation_suffixes: Vec<String>,
    #[serde(default)]
    plausibility_strip_suffixes: Vec<String>,
}

fn lower_set(items: Vec<String>) -> HashSet<String> {
    items.into_iter().map(|s| s.trim().to_lowercase()).collect()
}

fn lower_keys(map: HashMap<String, String>) -> HashMap<String, String> {
    map.into_iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v))
        .collect()
}

/// Compiled curated lists.
#[derive(Debug, Clone, Default)]
pub struct CuratedLists {
    protected_compounds: HashSet<String>,
    /// County names, most words first then longest first, original casing.
    pub county_names: Vec<String>,
    repeated_word_cities: HashSet<String>,
    bare_prefixes: HashSet<String>,
    lodging_keywords: Vec<String>,
    /// Trailing tokens the cleaner drops (`Mass`, `USA`, ...).
    pub noise_suffixes: Vec<String>,
    placeholders: HashSet<(String, String)>,
    url_filler_tokens: HashSet<String>,
    generic_name_words: HashSet<String>,
    saint_jurisdictions: HashSet<String>,
    joined_names: HashMap<String, String>,
    general_misspellings: HashMap<String, String>,
    truncation_suffixes: HashSet<String>,
    /// Suffixes tried off when a city is not found as-is.
    pub plausibility_strip_suffixes: Vec<String>,
}

impl CuratedLists {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CuratedFile = serde_json::from_str(json)
            .map_err(|e| Error::Reference(format!("curated lists: {e}")))?;

        let mut county_names: Vec<String> = file
            .county_names
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        county_names.sort_by(|a, b| {
            let words = |s: &str| s.split_whitespace().count();
            words(b)
                .cmp(&words(a))
                .then(b.len().cmp(&a.len()))
                .then(a.cmp(b))
        });
        county_names.dedup();

        Ok(Self {
            protected_compounds: lower_set(file.protected_compounds),
            county_names,
            repeated_word_cities: lower_set(file.repeated_word_cities),
            bare_prefixes: lower_set(file.bare_prefixes),
            lodging_keywords: file
                .lodging_keywords
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            noise_suffixes: file.noise_suffixes,
            placeholders: file
                .placeholders
                .into_iter()
                .map(|p| (p.city.trim().to_lowercase(), p.state.trim().to_ascii_uppercase()))
                .collect(),
            url_filler_tokens: lower_set(file.url_filler_tokens),
            generic_name_words: lower_set(file.generic_name_words),
            saint_jurisdictions: file
                .saint_jurisdictions
                .into_iter()
                .map(|s| s.trim().to_ascii_uppercase())
                .collect(),
            joined_names: lower_keys(file.joined_names),
            general_misspellings: lower_keys(file.general_misspellings),
            truncation_suffixes: lower_set(file.truncation_suffixes),
            plausibility_strip_suffixes: file.plausibility_strip_suffixes,
        })
    }

    pub fn is_protected_compound(&self, city: &str) -> bool {
        self.protected_compounds.contains(&city.trim().to_lowercase())
    }

    pub fn is_repeated_word_city(&self, city: &str) -> bool {
        self.repeated_word_cities.contains(&city.trim().to_lowercase())
    }

    /// Direction words, `Mount`, `Fort`, ... that are not a city on their own.
    pub fn is_bare_prefix(&self, word: &str) -> bool {
        self.bare_prefixes.contains(&word.trim().to_lowercase())
    }

    /// True when any lodging keyword appears as a whole word sequence.
    pub fn mentions_lodging(&self, text: &str) -> bool {
        let padded = format!(" {} ", text.to_lowercase());
        self.lodging_keywords
            .iter()
            .any(|kw| padded.contains(&format!(" {kw} ")))
    }

    pub fn is_placeholder(&self, city: &str, state: &str) -> bool {
        self.placeholders.contains(&(
            city.trim().to_lowercase(),
            state.trim().to_ascii_uppercase(),
        ))
    }

    pub fn is_url_filler(&self, token: &str) -> bool {
        self.url_filler_tokens.contains(&token.to_lowercase())
    }

    pub fn is_generic_name_word(&self, word: &str) -> bool {
        self.generic_name_words.contains(&word.to_lowercase())
    }

    /// Jurisdictions that spell out `Saint` rather than `St.`.
    pub fn spells_out_saint(&self, state: &str) -> bool {
        self.saint_jurisdictions.contains(state)
    }

    /// Display form of a joined La/Le/De name (`lagrange` → `LaGrange`).
    pub fn joined_name(&self, city: &str) -> Option<&str> {
        self.joined_names
            .get(&city.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn misspelling(&self, city: &str) -> Option<&str> {
        self.general_misspellings
            .get(&city.trim().to_lowercase())
            .map(String::as_str)
    }

    /// True when the last word looks like a truncated abbreviation.
    pub fn has_truncation_suffix(&self, city: &str) -> bool {
        city.split_whitespace()
            .last()
            .is_some_and(|w| self.truncation_suffixes.contains(&w.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CuratedLists {
        CuratedLists::from_json(
            r#"{
                "protected_compounds": ["Crystal Lake"],
                "county_names": ["Lake", "Prince George's", "Anne Arundel", "Cook"],
                "lodging_keywords": ["hotel", "holiday inn", "inn"],
                "placeholders": [{"city": "Anytown", "state": "us"}],
                "saint_jurisdictions": ["mn"],
                "joined_names": {"LaGrange": "LaGrange"},
                "truncation_suffixes": ["hts"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_county_order_multiword_first() {
        let lists = sample();
        assert_eq!(
            lists.county_names,
            vec!["Prince George's", "Anne Arundel", "Cook", "Lake"]
        );
    }

    #[test]
    fn test_lodging_is_word_level() {
        let lists = sample();
        assert!(lists.mentions_lodging("Holiday Inn Express"));
        assert!(lists.mentions_lodging("Airport Hotel"));
        assert!(!lists.mentions_lodging("Winnetka"));
    }

    #[test]
    fn test_predicates() {
        let lists = sample();
        assert!(lists.is_protected_compound("crystal lake"));
        assert!(lists.is_placeholder("ANYTOWN", "US"));
        assert!(lists.spells_out_saint("MN"));
        assert_eq!(lists.joined_name("lagrange"), Some("LaGrange"));
        assert!(lists.has_truncation_suffix("Jackson Hts"));
        assert!(!lists.has_truncation_suffix("Jackson Heights"));
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let lists = CuratedLists::from_json("{}").unwrap();
        assert!(lists.county_names.is_empty());
        assert!(!lists.is_bare_prefix("north"));
    }
}
