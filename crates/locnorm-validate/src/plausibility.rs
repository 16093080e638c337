//! City-name plausibility against the known-valid city set.

use locnorm_core::{jurisdiction, BrandCollection, CanonicalLocation};
use locnorm_reference::ReferenceDataStore;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspicionReason {
    /// Absent from the valid-city set, with or without a common suffix.
    NotInReference,
    LeadingDigit,
    /// The city is just a jurisdiction code (`NJ`).
    StateCode,
    Truncated,
    TooManyWords,
    /// Digits, URL or email fragments.
    JunkFragment,
}

impl SuspicionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInReference => "not_in_reference",
            Self::LeadingDigit => "leading_digit",
            Self::StateCode => "state_code",
            Self::Truncated => "truncated",
            Self::TooManyWords => "too_many_words",
            Self::JunkFragment => "junk_fragment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspiciousCity {
    pub source: String,
    pub city: String,
    pub claimed_state: String,
    pub reasons: Vec<SuspicionReason>,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

impl SuspiciousCity {
    /// `;`-joined reason names.
    pub fn reasons_label(&self) -> String {
        self.reasons
            .iter()
            .map(SuspicionReason::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

const JUNK_MARKERS: &[&str] = &["http", "www.", ".com", "@"];

fn strip_suffix_ignore_case<'a>(city: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = city.len().checked_sub(suffix.len())?;
    (city.is_char_boundary(cut) && city[cut..].eq_ignore_ascii_case(suffix)).then(|| &city[..cut])
}

fn known_with_suffix_stripped(city: &str, state: &str, refs: &ReferenceDataStore) -> bool {
    refs.curated.plausibility_strip_suffixes.iter().any(|suffix| {
        strip_suffix_ignore_case(city, suffix)
            .and_then(|stem| stem.strip_suffix(' '))
            .map(str::trim_end)
            .is_some_and(|stem| !stem.is_empty() && refs.valid_cities.contains(stem, state))
    })
}

/// Reasons `city` looks wrong for `state`; empty when plausible.
///
/// Empty cities, Canadian provinces and states without zip-derived reference
/// data are never flagged.
pub fn check_city(city: &str, state: &str, refs: &ReferenceDataStore) -> Vec<SuspicionReason> {
    let city = city.trim();
    if city.is_empty() || jurisdiction::is_canadian_code(state) || !refs.valid_cities.has_state(state) {
        return Vec::new();
    }

    let mut reasons = Vec::new();
    if !refs.valid_cities.contains(city, state) && !known_with_suffix_stripped(city, state, refs) {
        reasons.push(SuspicionReason::NotInReference);
    }

    let leading_digit = city.starts_with(|c: char| c.is_ascii_digit());
    if leading_digit {
        reasons.push(SuspicionReason::LeadingDigit);
    }
    if city.len() == 2 && jurisdiction::is_known_code(&city.to_ascii_uppercase()) {
        reasons.push(SuspicionReason::StateCode);
    }
    if refs.curated.has_truncation_suffix(city) {
        reasons.push(SuspicionReason::Truncated);
    }
    if city.split_whitespace().count() >= 4 {
        reasons.push(SuspicionReason::TooManyWords);
    }
    let lower = city.to_lowercase();
    let has_digit = !leading_digit && city.chars().any(|c| c.is_ascii_digit());
    if has_digit || JUNK_MARKERS.iter().any(|m| lower.contains(m)) {
        reasons.push(SuspicionReason::JunkFragment);
    }
    reasons
}

fn check_location(loc: &CanonicalLocation, refs: &ReferenceDataStore) -> Option<SuspiciousCity> {
    let reasons = check_city(&loc.city, &loc.state, refs);
    if reasons.is_empty() {
        return None;
    }
    Some(SuspiciousCity {
        source: String::new(),
        city: loc.city.clone(),
        claimed_state: loc.state.clone(),
        reasons,
        lat: loc.lat,
        lon: loc.lon,
        address: loc.address.clone(),
    })
}

/// Plausibility findings for one brand.
pub fn check_collection(collection: &BrandCollection, refs: &ReferenceDataStore) -> Vec<SuspiciousCity> {
    let found: Vec<SuspiciousCity> = collection
        .locations
        .iter()
        .filter_map(|loc| check_location(loc, refs))
        .map(|mut s| {
            s.source = collection.key.clone();
            s
        })
        .collect();
    info!(
        "Plausibility check '{}': {} suspicious cities",
        collection.key,
        found.len()
    );
    found
}
