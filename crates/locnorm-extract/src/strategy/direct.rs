//! Structured tags under their common synonyms.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::state_code;
use locnorm_core::RawRecord;
use locnorm_reference::ReferenceDataStore;

pub const CITY_KEYS: &[&str] = &["addr:city", "city", "City", "addr_city", "locality"];
pub const STATE_KEYS: &[&str] = &[
    "addr:state",
    "state",
    "State",
    "addr:province",
    "province",
    "region",
];
pub const ADDRESS_KEYS: &[&str] = &["addr:street_address", "street_address", "address"];

pub struct DirectTags;

impl DirectTags {
    fn address(record: &RawRecord) -> Option<String> {
        if let Some(address) = record.first_tag(ADDRESS_KEYS) {
            return Some(address.to_string());
        }
        match (record.tag("addr:housenumber"), record.tag("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.to_string()),
            _ => None,
        }
    }
}

impl FieldStrategy for DirectTags {
    fn name(&self) -> &'static str {
        "direct_tags"
    }

    fn apply(&self, record: &RawRecord, _: &PartialFields, _: &ReferenceDataStore) -> PartialFields {
        PartialFields {
            city: record.first_tag(CITY_KEYS).map(str::to_string),
            state: STATE_KEYS
                .iter()
                .filter_map(|k| record.tag(k))
                .find_map(state_code),
            address: Self::address(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(record: &RawRecord) -> PartialFields {
        let refs = ReferenceDataStore::default();
        DirectTags.apply(record, &PartialFields::default(), &refs)
    }

    #[test]
    fn test_synonyms_and_priority() {
        let record = RawRecord::new(40.0, -74.0)
            .with_tag("locality", "Weehawken")
            .with_tag("city", "Hoboken")
            .with_tag("province", "new jersey")
            .with_tag("addr:housenumber", "221")
            .with_tag("addr:street", "River St");
        let out = apply(&record);
        assert_eq!(out.city.as_deref(), Some("Hoboken"));
        assert_eq!(out.state.as_deref(), Some("NJ"));
        assert_eq!(out.address.as_deref(), Some("221 River St"));
    }

    #[test]
    fn test_unrecognized_state_value_is_ignored() {
        let record = RawRecord::new(40.0, -74.0)
            .with_tag("addr:state", "Jersey")
            .with_tag("state", "nj");
        assert_eq!(apply(&record).state.as_deref(), Some("NJ"));

        let record = RawRecord::new(40.0, -74.0).with_tag("state", "Garden State");
        assert_eq!(apply(&record).state, None);
    }
}
