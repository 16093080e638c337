//! Free-text scan for a full state name preceded by a city token.
//!
//! Handles full-address strings without usable comma structure, such as
//! `55 Main St Springfield Illinois 62701`.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::FULL_ADDRESS_KEYS;
use locnorm_core::{jurisdiction, Jurisdiction, RawRecord};
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

/// Every full jurisdiction name, longest first so `West Virginia` beats `Virginia`.
static STATE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<String> = jurisdiction::names_longest_first()
        .into_iter()
        .map(regex::escape)
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", names.join("|"))).unwrap()
});

const STREET_WORDS: &[&str] = &[
    "st", "street", "ave", "avenue", "rd", "road", "blvd", "dr", "drive", "ln", "lane",
    "way", "ct", "court", "pl", "place", "hwy", "highway", "pkwy", "parkway", "nw", "ne",
    "sw", "se", "suite", "ste", "unit",
];

fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| c == ',' || c == '.' || c == ';')
}

/// Pick the city token before a state name. Up to three trailing words are
/// tried against the valid-city set first; otherwise the single last word is
/// used when it is a capitalized non-street word.
fn city_before(prefix: &str, state: &str, refs: &ReferenceDataStore) -> Option<String> {
    let words: Vec<&str> = prefix
        .split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .collect();

    for take in (1..=words.len().min(3)).rev() {
        let candidate = words[words.len() - take..].join(" ");
        if refs.valid_cities.contains(&candidate, state) {
            return Some(candidate);
        }
    }

    let last = *words.last()?;
    let plausible = last.chars().next().is_some_and(char::is_uppercase)
        && last.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
        && !STREET_WORDS.contains(&last.to_lowercase().as_str());
    plausible.then(|| last.to_string())
}

/// A state name that opens a street name, like `Virginia Ave`.
fn names_street(after: &str) -> bool {
    after
        .split_whitespace()
        .next()
        .map(clean_word)
        .is_some_and(|w| STREET_WORDS.contains(&w.to_lowercase().as_str()))
}

/// Scan `text` right to left for a state name with a plausible city before
/// it. A state name with no city token yields nothing.
pub fn scan(text: &str, refs: &ReferenceDataStore) -> PartialFields {
    let matches: Vec<_> = STATE_NAME_RE.find_iter(text).collect();

    for m in matches.iter().rev() {
        if names_street(&text[m.end()..]) {
            continue;
        }
        let Some(j) = Jurisdiction::from_name(m.as_str()) else {
            continue;
        };
        if let Some(city) = city_before(&text[..m.start()], j.code, refs) {
            return PartialFields {
                city: Some(city),
                state: Some(j.code.to_string()),
                address: None,
            };
        }
    }
    PartialFields::default()
}

pub struct StateNameScan;

impl FieldStrategy for StateNameScan {
    fn name(&self) -> &'static str {
        "state_scan"
    }

    fn apply(&self, record: &RawRecord, _: &PartialFields, refs: &ReferenceDataStore) -> PartialFields {
        record
            .first_tag(FULL_ADDRESS_KEYS)
            .map(|text| scan(text, refs))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locnorm_reference::ZipIndex;

    fn refs() -> ReferenceDataStore {
        let mut zips = ZipIndex::new();
        zips.insert("07024", "Fort Lee", "NJ");
        ReferenceDataStore::builtin_with_zips(zips).unwrap()
    }

    #[test]
    fn test_single_word_city() {
        let out = scan("55 Main St Springfield Illinois 62701", &refs());
        assert_eq!(out.city.as_deref(), Some("Springfield"));
        assert_eq!(out.state.as_deref(), Some("IL"));
    }

    #[test]
    fn test_multi_word_city_confirmed_by_reference() {
        let out = scan("500 Palisade Ave Fort Lee New Jersey", &refs());
        assert_eq!(out.city.as_deref(), Some("Fort Lee"));
        assert_eq!(out.state.as_deref(), Some("NJ"));
    }

    #[test]
    fn test_longest_state_name_wins() {
        let out = scan("Morgantown West Virginia", &refs());
        assert_eq!(out.state.as_deref(), Some("WV"));
        assert_eq!(out.city.as_deref(), Some("Morgantown"));
    }

    #[test]
    fn test_state_without_city() {
        assert_eq!(scan("100 Oak Street Ohio", &refs()), PartialFields::default());
        assert_eq!(scan("nothing here", &refs()), PartialFields::default());
    }

    #[test]
    fn test_state_named_streets_are_skipped() {
        assert_eq!(scan("100 Virginia Ave 46204", &refs()), PartialFields::default());
        assert_eq!(scan("12 Main Washington St", &refs()), PartialFields::default());
        assert_eq!(scan("Suite 4, Indiana Avenue", &refs()), PartialFields::default());

        let out = scan("200 Indiana Ave Indianapolis Indiana 46204", &refs());
        assert_eq!(out.city.as_deref(), Some("Indianapolis"));
        assert_eq!(out.state.as_deref(), Some("IN"));
    }
}
