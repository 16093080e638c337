//! Record assembly: raw records in, canonical locations out.

use std::collections::HashSet;

use locnorm_core::types::coordinate_key;
use locnorm_core::{jurisdiction, AssemblyStats, CanonicalLocation, RawRecord, DEDUP_PRECISION};
use locnorm_extract::{Extraction, Extractor};
use locnorm_normalize::canonicalize;
use locnorm_reference::ReferenceDataStore;
use tracing::{debug, info};

use crate::types::*;

pub const COUNTRY_KEYS: &[&str] = &["addr:country", "country"];

const NORTH_AMERICA_COUNTRIES: &[&str] = &[
    "us",
    "usa",
    "u.s.",
    "u.s.a.",
    "united states",
    "united states of america",
    "ca",
    "can",
    "canada",
];

/// Coarse US/Canada box (lat 14–84, lon −170 to −50) plus the Aleutians
/// west of the antimeridian.
pub fn in_north_america_box(lat: f64, lon: f64) -> bool {
    (14.0..=84.0).contains(&lat) && ((-170.0..=-50.0).contains(&lon) || lon >= 172.0)
}

/// US/Canada membership: explicit country tag, else the extracted state,
/// else the coordinate box.
pub fn is_north_american(record: &RawRecord, state: &str, lat: f64, lon: f64) -> bool {
    if let Some(country) = record.first_tag(COUNTRY_KEYS) {
        return NORTH_AMERICA_COUNTRIES.contains(&country.to_lowercase().as_str());
    }
    if !state.is_empty() {
        return jurisdiction::is_known_code(state);
    }
    in_north_america_box(lat, lon)
}

fn count_drop(stats: &mut AssemblyStats, reason: DropReason) {
    match reason {
        DropReason::MissingCoordinates => stats.missing_coordinates += 1,
        DropReason::Placeholder => stats.placeholders += 1,
        DropReason::OutsideNorthAmerica => stats.outside_north_america += 1,
        DropReason::Duplicate => stats.duplicates += 1,
    }
}

/// Assembles one brand's records against a shared reference store.
pub struct RecordAssembler<'a> {
    refs: &'a ReferenceDataStore,
    extractor: Extractor,
    keep_display_names: bool,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(refs: &'a ReferenceDataStore) -> Self {
        Self {
            refs,
            extractor: Extractor::standard(),
            keep_display_names: false,
        }
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn keep_display_names(mut self, keep: bool) -> Self {
        self.keep_display_names = keep;
        self
    }

    /// Extract, filter and canonicalize a single record. Deduplication is
    /// handled by [`assemble`](Self::assemble), keyed on the raw coordinates.
    pub fn assemble_one(&self, record: &RawRecord) -> Result<CanonicalLocation, DropReason> {
        let (lat, lon) = record.coordinates().ok_or(DropReason::MissingCoordinates)?;

        let extraction: Extraction = self.extractor.extract(record, self.refs);
        if extraction.is_placeholder(self.refs) {
            return Err(DropReason::Placeholder);
        }
        if !is_north_american(record, &extraction.state, lat, lon) {
            return Err(DropReason::OutsideNorthAmerica);
        }

        let city = canonicalize(&extraction.city, &extraction.state, self.refs);
        let display_name = if self.keep_display_names {
            record.tag("name").map(str::to_string)
        } else {
            None
        };

        Ok(CanonicalLocation::new(lat, lon, city, extraction.state, extraction.address)
            .with_display_name(display_name))
    }

    /// Run the full assembly over a record stream.
    pub fn assemble(&self, records: &[RawRecord]) -> AssemblyOutput {
        let start = std::time::Instant::now();
        let mut stats = AssemblyStats {
            input_records: records.len(),
            ..Default::default()
        };
        let mut seen: HashSet<(i64, i64)> = HashSet::new();
        let mut locations = Vec::new();

        for record in records {
            let kept = self.assemble_one(record).and_then(|location| {
                let first = record.coordinates().is_some_and(|(lat, lon)| {
                    seen.insert(coordinate_key(lat, lon, DEDUP_PRECISION))
                });
                if first {
                    Ok(location)
                } else {
                    Err(DropReason::Duplicate)
                }
            });
            match kept {
                Ok(location) => locations.push(location),
                Err(reason) => {
                    debug!("Dropped record: {:?}", reason);
                    count_drop(&mut stats, reason);
                }
            }
        }

        locations.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.city.cmp(&b.city)));

        stats.locations = locations.len();
        stats.with_state = locations.iter().filter(|l| !l.state.is_empty()).count();
        stats.with_city = locations.iter().filter(|l| !l.city.is_empty()).count();
        stats.with_address = locations.iter().filter(|l| !l.address.is_empty()).count();

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Assembled {} of {} records (no coords={}, placeholder={}, outside={}, dup={}) \
             state={:.1}% city={:.1}% address={:.1}% in {}ms",
            stats.locations,
            stats.input_records,
            stats.missing_coordinates,
            stats.placeholders,
            stats.outside_north_america,
            stats.duplicates,
            stats.state_pct(),
            stats.city_pct(),
            stats.address_pct(),
            duration_ms
        );

        AssemblyOutput {
            locations,
            stats,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs() -> ReferenceDataStore {
        ReferenceDataStore::builtin().unwrap()
    }

    #[test]
    fn test_north_america_box() {
        assert!(in_north_america_box(40.7, -74.0));
        assert!(in_north_america_box(52.0, 178.0));
        assert!(!in_north_america_box(51.5, -0.1));
        assert!(!in_north_america_box(10.0, -80.0));
    }

    #[test]
    fn test_country_tag_wins() {
        let uk = RawRecord::new(40.7, -74.0).with_tag("addr:country", "GB");
        assert!(!is_north_american(&uk, "NY", 40.7, -74.0));
        let ca = RawRecord::new(51.5, -0.1).with_tag("country", "Canada");
        assert!(is_north_american(&ca, "", 51.5, -0.1));
    }

    #[test]
    fn test_state_then_box() {
        let record = RawRecord::new(40.7, -74.0);
        assert!(!is_north_american(&record, "XY", 40.7, -74.0));
        assert!(is_north_american(&record, "QC", 0.0, 0.0));
        assert!(!is_north_american(&record, "", 48.85, 2.35));
    }

    #[test]
    fn test_drop_reasons_are_counted() {
        let refs = refs();
        let records = vec![
            RawRecord::without_coordinates().with_tag("city", "Boston"),
            RawRecord::new(42.36, -71.06)
                .with_tag("city", "Anytown")
                .with_tag("state", "US"),
            RawRecord::new(48.85, 2.35).with_tag("city", "Paris"),
            RawRecord::new(42.36, -71.06)
                .with_tag("city", "BOSTON")
                .with_tag("state", "MA"),
            RawRecord::new(42.36001, -71.06001)
                .with_tag("city", "Boston")
                .with_tag("state", "MA"),
        ];
        let out = RecordAssembler::new(&refs).assemble(&records);
        assert_eq!(out.stats.input_records, 5);
        assert_eq!(out.stats.missing_coordinates, 1);
        assert_eq!(out.stats.placeholders, 1);
        assert_eq!(out.stats.outside_north_america, 1);
        assert_eq!(out.stats.duplicates, 1);
        assert_eq!(out.locations.len(), 1);
        assert_eq!(out.locations[0].city, "Boston");
    }

    #[test]
    fn test_dedup_first_seen_wins() {
        let refs = refs();
        let records = vec![
            RawRecord::new(40.00001, -74.00001)
                .with_tag("city", "First")
                .with_tag("state", "NJ"),
            RawRecord::new(40.00004, -74.00002)
                .with_tag("city", "Second")
                .with_tag("state", "NJ"),
        ];
        let out = RecordAssembler::new(&refs).assemble(&records);
        assert_eq!(out.locations.len(), 1);
        assert_eq!(out.locations[0].city, "First");
        assert_eq!(out.locations[0].lat, 40.00001);
    }

    #[test]
    fn test_dedup_key_uses_raw_coordinates() {
        let refs = refs();
        // Both round to the same 4-decimal cell; the first rounds up at 6 decimals.
        let records = vec![
            RawRecord::new(40.0000496, -74.00001)
                .with_tag("city", "Toms River")
                .with_tag("state", "NJ"),
            RawRecord::new(40.00001, -74.00001)
                .with_tag("city", "Toms River")
                .with_tag("state", "NJ"),
        ];
        let out = RecordAssembler::new(&refs).assemble(&records);
        assert_eq!(out.locations.len(), 1);
        assert_eq!(out.stats.duplicates, 1);
        assert_eq!(out.locations[0].lat, 40.00005);
    }

    #[test]
    fn test_sorted_by_state_then_city() {
        let refs = refs();
        let records = vec![
            RawRecord::new(40.9, -74.0).with_tag("city", "Paramus").with_tag("state", "NJ"),
            RawRecord::new(42.3, -71.1).with_tag("city", "Newton").with_tag("state", "MA"),
            RawRecord::new(40.8, -74.1).with_tag("city", "Clifton").with_tag("state", "NJ"),
        ];
        let out = RecordAssembler::new(&refs).assemble(&records);
        let order: Vec<_> = out.locations.iter().map(|l| l.city.as_str()).collect();
        assert_eq!(order, vec!["Newton", "Clifton", "Paramus"]);
        assert_eq!(out.stats.with_state, 3);
        assert_eq!(out.stats.with_address, 0);
    }

    #[test]
    fn test_display_names_kept_on_request() {
        let refs = refs();
        let records = vec![RawRecord::new(40.9, -74.0)
            .with_tag("name", "Acme Paramus")
            .with_tag("state", "NJ")];
        let plain = RecordAssembler::new(&refs).assemble(&records);
        assert_eq!(plain.locations[0].display_name, None);
        let kept = RecordAssembler::new(&refs)
            .keep_display_names(true)
            .assemble(&records);
        assert_eq!(kept.locations[0].display_name.as_deref(), Some("Acme Paramus"));
    }
}
