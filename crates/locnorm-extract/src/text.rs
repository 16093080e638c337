//! Small text helpers shared by the strategies.

use locnorm_core::Jurisdiction;
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tags holding a one-line postal address.
pub const FULL_ADDRESS_KEYS: &[&str] = &["addr:full", "full_address", "address_full"];

/// `at X`, `in the X`, `... at ...`: venue phrasing, not a city.
static VENUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:at|in the)\s|\sat\s").unwrap());

/// Trailing `, ST` left on a candidate (`Fort Lee, NJ`).
static TRAILING_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",?\s+[A-Z]{2}$").unwrap());

/// Map a state tag value to a two-letter code.
///
/// Two-letter values are upper-cased as-is; full names resolve through the
/// jurisdiction table; anything else is ignored.
pub fn state_code(value: &str) -> Option<String> {
    let value = value.trim().trim_end_matches('.');
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(value.to_ascii_uppercase());
    }
    Jurisdiction::from_name(value).map(|j| j.code.to_string())
}

/// Hotel/resort/venue wording that disqualifies a city candidate.
pub fn is_lodging_candidate(city: &str, refs: &ReferenceDataStore) -> bool {
    refs.curated.mentions_lodging(city) || VENUE_RE.is_match(city)
}

/// Upper-case the first letter, lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Drop a trailing `, ST` or ` ST` jurisdiction code.
pub fn strip_trailing_code(candidate: &str) -> &str {
    match TRAILING_CODE_RE.find(candidate) {
        Some(m) if Jurisdiction::from_code(m.as_str().trim_start_matches(',').trim()).is_some() => {
            candidate[..m.start()].trim()
        }
        _ => candidate.trim(),
    }
}

/// Heuristic test for "this string names a place".
///
/// 1–4 words, no digits, every word capitalized (short connectors such as
/// `of`, `la`, `du` may be lower-case after the first word), and not led by
/// store vocabulary.
pub fn looks_like_place(candidate: &str, refs: &ReferenceDataStore) -> bool {
    let words: Vec<&str> = candidate.split_whitespace().collect();
    if words.is_empty() || words.len() > 4 {
        return false;
    }
    if candidate.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let capitalized = words.iter().enumerate().all(|(i, w)| {
        let starts_upper = w.chars().next().is_some_and(char::is_uppercase);
        starts_upper || (i > 0 && matches!(*w, "of" | "the" | "la" | "le" | "de" | "du" | "in"))
    });
    if !capitalized {
        return false;
    }
    let generic = |w: &&str| {
        refs.curated
            .is_generic_name_word(w.trim_matches(|c: char| !c.is_alphanumeric()))
    };
    !(words.first().is_some_and(|w| generic(w)) || words.iter().all(generic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs() -> ReferenceDataStore {
        ReferenceDataStore::builtin().unwrap()
    }

    #[test]
    fn test_state_code() {
        assert_eq!(state_code("ma").as_deref(), Some("MA"));
        assert_eq!(state_code("New Jersey").as_deref(), Some("NJ"));
        assert_eq!(state_code("XX").as_deref(), Some("XX"));
        assert_eq!(state_code("Mass"), None);
    }

    #[test]
    fn test_lodging_candidates() {
        let refs = refs();
        assert!(is_lodging_candidate("Hampton Inn Downtown", &refs));
        assert!(is_lodging_candidate("at Harbor Point", &refs));
        assert!(is_lodging_candidate("Shops at Legacy", &refs));
        assert!(!is_lodging_candidate("Fort Lee", &refs));
    }

    #[test]
    fn test_looks_like_place() {
        let refs = refs();
        assert!(looks_like_place("Fort Lee", &refs));
        assert!(looks_like_place("College Station", &refs));
        assert!(looks_like_place("Lake in the Hills", &refs));
        assert!(!looks_like_place("Store 45", &refs));
        assert!(!looks_like_place("downtown", &refs));
        assert!(!looks_like_place("Main Street", &refs));
        assert!(!looks_like_place("A B C D E", &refs));
    }

    #[test]
    fn test_strip_trailing_code() {
        assert_eq!(strip_trailing_code("Fort Lee, NJ"), "Fort Lee");
        assert_eq!(strip_trailing_code("Fort Lee NJ"), "Fort Lee");
        assert_eq!(strip_trailing_code("Fort Lee"), "Fort Lee");
        assert_eq!(strip_trailing_code("Boston ZZ"), "Boston ZZ");
    }
}
