//! City hints embedded in the POI's display name.
//!
//! Scrapers often publish names like `Brand - Fort Lee`, `Pizza of Hoboken`,
//! `Brand in Paramus` or `Brand Newark #1234`. The first three shapes are
//! accepted when the candidate looks like a place. The residual shape (brand
//! prefix and store numbers removed) is weaker, so it must also be confirmed
//! by the valid-city set for the state already known for the record.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::{looks_like_place, strip_trailing_code};
use locnorm_core::RawRecord;
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

static DASH_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s[-–—]\s+([^-–—]+)$").unwrap());
static OF_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:'s)?\s(?:of|Of|OF)\s+(.+)$").unwrap());
static IN_AT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s(?:in|at|In|At)\s+(.+)$").unwrap());
static STORE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#\s*\d+|\bno\.?\s*\d+\b|\bstore\s*#?\s*\d+\b|\b\d+\b").unwrap()
});

fn residual(name: &str, brand: Option<&str>) -> String {
    let mut rest = name.trim();
    if let Some(brand) = brand {
        if rest.len() >= brand.len()
            && rest.is_char_boundary(brand.len())
            && rest[..brand.len()].eq_ignore_ascii_case(brand)
        {
            rest = &rest[brand.len()..];
        }
    }
    let stripped = STORE_NUMBER_RE.replace_all(rest, " ");
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '-' | '–' | ':' | '|' | ',' | '(' | ')' | ' '))
        .to_string()
}

/// Candidate from the structured name patterns, if any.
pub fn pattern_candidate(name: &str, refs: &ReferenceDataStore) -> Option<String> {
    [&DASH_SUFFIX_RE, &OF_SUFFIX_RE, &IN_AT_SUFFIX_RE]
        .iter()
        .filter_map(|re| re.captures(name))
        .filter_map(|caps| caps.get(1).map(|m| strip_trailing_code(m.as_str()).to_string()))
        .find(|candidate| looks_like_place(candidate, refs))
}

pub struct DisplayName;

impl FieldStrategy for DisplayName {
    fn name(&self) -> &'static str {
        "display_name"
    }

    fn apply(
        &self,
        record: &RawRecord,
        known: &PartialFields,
        refs: &ReferenceDataStore,
    ) -> PartialFields {
        if known.city.is_some() {
            return PartialFields::default();
        }
        let Some(name) = record.tag("name") else {
            return PartialFields::default();
        };

        let city = pattern_candidate(name, refs).or_else(|| {
            let state = known.state.as_deref()?;
            let candidate = residual(name, record.tag("brand"));
            (looks_like_place(&candidate, refs) && refs.valid_cities.contains(&candidate, state))
                .then_some(candidate)
        });

        PartialFields {
            city,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locnorm_reference::ZipIndex;

    fn refs() -> ReferenceDataStore {
        let mut zips = ZipIndex::new();
        zips.insert("07102", "Newark", "NJ");
        ReferenceDataStore::builtin_with_zips(zips).unwrap()
    }

    fn city_for(record: &RawRecord, state: Option<&str>) -> Option<String> {
        let known = PartialFields {
            state: state.map(str::to_string),
            ..Default::default()
        };
        DisplayName.apply(record, &known, &refs()).city
    }

    #[test]
    fn test_name_patterns() {
        let refs = refs();
        assert_eq!(pattern_candidate("Acme Pizza - Fort Lee", &refs).as_deref(), Some("Fort Lee"));
        assert_eq!(pattern_candidate("Acme - Fort Lee, NJ", &refs).as_deref(), Some("Fort Lee"));
        assert_eq!(pattern_candidate("Bagel Bros of Hoboken", &refs).as_deref(), Some("Hoboken"));
        assert_eq!(pattern_candidate("Sal's of Paramus", &refs).as_deref(), Some("Paramus"));
        assert_eq!(pattern_candidate("Acme in Teaneck", &refs).as_deref(), Some("Teaneck"));
        assert_eq!(pattern_candidate("Acme - Store 12", &refs), None);
        assert_eq!(pattern_candidate("Acme Pizza", &refs), None);
    }

    #[test]
    fn test_residual_requires_valid_city_and_state() {
        let record = RawRecord::new(40.7, -74.2)
            .with_tag("name", "Acme Newark #1234")
            .with_tag("brand", "Acme");
        assert_eq!(city_for(&record, Some("NJ")).as_deref(), Some("Newark"));
        assert_eq!(city_for(&record, Some("DE")), None);
        assert_eq!(city_for(&record, None), None);
    }

    #[test]
    fn test_residual_strip() {
        assert_eq!(residual("ACME Store #45 Newark", Some("Acme")), "Newark");
        assert_eq!(residual("Acme No. 7 - Newark", Some("Acme")), "Newark");
    }
}
