//! Comma-separated one-line address: `street, city, State 12345[, country]`.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::FULL_ADDRESS_KEYS;
use locnorm_core::{jurisdiction, Jurisdiction, RawRecord};
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

/// A part holding a jurisdiction, optionally followed by a US or Canadian postal code.
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.*?[^\d\s])\s*(?:\d{5}(?:-\d{4})?|[A-Za-z]\d[A-Za-z]\s?\d[A-Za-z]\d)?$")
        .unwrap()
});

/// Suite/unit/floor designators that are never a city.
static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:#|(?:suite|ste|unit|floor|fl|room|rm|apt|bldg)\b)").unwrap()
});

const COUNTRY_WORDS: &[&str] = &[
    "us",
    "usa",
    "u.s.",
    "u.s.a.",
    "united states",
    "united states of america",
    "canada",
];

/// Resolve an address part to a jurisdiction code.
///
/// Full names match case-insensitively; a bare two-letter code must be
/// written upper-case so that words like `In` or `Me` are not mistaken for
/// Indiana or Maine.
fn anchor_code(part: &str) -> Option<&'static str> {
    let caps = ANCHOR_RE.captures(part.trim())?;
    let name = caps.name("name")?.as_str().trim();
    if let Some(j) = Jurisdiction::from_name(name) {
        return Some(j.code);
    }
    if name.len() == 2 && jurisdiction::is_known_code(name) {
        return Jurisdiction::from_code(name).map(|j| j.code);
    }
    None
}

fn is_unusable_city(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_digit()) || UNIT_RE.is_match(token)
}

/// Split a full address into (city, state, address).
pub fn parse_full_address(full: &str) -> PartialFields {
    let mut parts: Vec<&str> = full
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    // Trailing country, including `CA` after a Canadian province.
    if parts.len() > 2 {
        let last = parts[parts.len() - 1];
        let before = parts[parts.len() - 2];
        let country_word = COUNTRY_WORDS.contains(&last.to_lowercase().as_str());
        let canada_after_province = last == "CA"
            && anchor_code(before).is_some_and(jurisdiction::is_canadian_code);
        if country_word || canada_after_province {
            parts.pop();
        }
    }

    let Some((idx, code)) = parts
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find_map(|(i, p)| anchor_code(p).map(|code| (i, code)))
    else {
        return PartialFields::default();
    };

    let city_token = parts[idx - 1];
    let (city, address_end) = if is_unusable_city(city_token) {
        (None, idx)
    } else {
        (Some(city_token.to_string()), idx - 1)
    };
    let address = (address_end > 0).then(|| parts[..address_end].join(", "));

    PartialFields {
        city,
        state: Some(code.to_string()),
        address,
    }
}

pub struct FullAddress;

impl FieldStrategy for FullAddress {
    fn name(&self) -> &'static str {
        "full_address"
    }

    fn apply(&self, record: &RawRecord, _: &PartialFields, _: &ReferenceDataStore) -> PartialFields {
        record
            .first_tag(FULL_ADDRESS_KEYS)
            .map(parse_full_address)
            .unwrap_or_default()
    }
}
