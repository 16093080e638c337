//! Postal code → (city, state) through the zip index.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::FULL_ADDRESS_KEYS;
use locnorm_core::RawRecord;
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

pub const POSTCODE_KEYS: &[&str] = &["addr:postcode", "postcode", "zip", "postal_code", "zipcode"];

/// A ZIP closing the address, optionally followed by the country.
static TAIL_ZIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s,])(?P<zip>\d{5}(?:-\d{4})?)[\s,]*(?:usa?|united states(?: of america)?)?\.?\s*$")
        .unwrap()
});

/// Postal code tag, else a ZIP at the end of the full address. A five-digit
/// house number elsewhere in the address is not a ZIP.
pub fn postal_code(record: &RawRecord) -> Option<&str> {
    record.first_tag(POSTCODE_KEYS).or_else(|| {
        let full = record.first_tag(FULL_ADDRESS_KEYS)?;
        TAIL_ZIP_RE
            .captures(full)
            .and_then(|caps| caps.name("zip"))
            .map(|m| m.as_str())
    })
}

pub struct PostalCode;

impl FieldStrategy for PostalCode {
    fn name(&self) -> &'static str {
        "postal_code"
    }

    fn apply(&self, record: &RawRecord, _: &PartialFields, refs: &ReferenceDataStore) -> PartialFields {
        let Some(entry) = postal_code(record).and_then(|zip| refs.zips.lookup(zip)) else {
            return PartialFields::default();
        };
        PartialFields {
            city: Some(entry.city.clone()),
            state: Some(entry.state.clone()),
            address: None,
        }
    }
}
