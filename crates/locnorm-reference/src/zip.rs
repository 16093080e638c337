//! Postal code → (city, state) index loaded from a delimited table.

use locnorm_core::{Error, Jurisdiction, Result};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

const ZIP_COLUMNS: &[&str] = &["zip", "zipcode", "zip_code", "postal_code", "postcode"];
const CITY_COLUMNS: &[&str] = &["city", "primary_city", "place"];
const STATE_COLUMNS: &[&str] = &["state", "state_code", "st"];

/// City and state a postal code belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    pub city: String,
    pub state: String,
}

/// Many-to-one postal code index. Later rows overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ZipIndex {
    entries: HashMap<String, ZipEntry>,
}

/// Normalize a postal code to its lookup key.
///
/// US codes become 5 digits: ZIP+4 is truncated and leading zeros dropped
/// by spreadsheet exports (`2141` → `02141`) are restored. Canadian codes
/// are upper-cased with the inner space removed.
pub fn normalize_postal(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let head = raw.split('-').next().unwrap_or(raw).trim();

    if head.chars().all(|c| c.is_ascii_digit()) {
        return match head.len() {
            3..=5 => Some(format!("{head:0>5}")),
            9 => Some(head[..5].to_string()),
            _ => None,
        };
    }

    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let bytes = compact.as_bytes();
    let canadian = bytes.len() == 6
        && bytes.iter().enumerate().all(|(i, b)| {
            if i % 2 == 0 {
                b.is_ascii_alphabetic()
            } else {
                b.is_ascii_digit()
            }
        });
    canadian.then_some(compact)
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.iter().any(|c| h.trim().eq_ignore_ascii_case(c)))
}

impl ZipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a headered CSV table. Column names are matched case-insensitively
    /// against the usual synonyms; rows with an unusable code or an unknown
    /// state are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|e| Error::Csv(e.to_string()))?.clone();
        let zip_col = find_column(&headers, ZIP_COLUMNS)
            .ok_or_else(|| Error::Reference("zip table has no postal code column".into()))?;
        let city_col = find_column(&headers, CITY_COLUMNS)
            .ok_or_else(|| Error::Reference("zip table has no city column".into()))?;
        let state_col = find_column(&headers, STATE_COLUMNS)
            .ok_or_else(|| Error::Reference("zip table has no state column".into()))?;

        let mut index = Self::new();
        let mut skipped = 0usize;
        for row in rdr.records() {
            let row = row.map_err(|e| Error::Csv(e.to_string()))?;
            let zip = row.get(zip_col).and_then(normalize_postal);
            let city = row.get(city_col).map(str::trim).unwrap_or("");
            let state = row
                .get(state_col)
                .and_then(Jurisdiction::resolve)
                .map(|j| j.code);

            match (zip, state) {
                (Some(zip), Some(state)) if !city.is_empty() => {
                    index.insert(zip, city, state);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} unusable zip table rows", skipped);
        }
        debug!("Loaded {} postal codes", index.len());
        Ok(index)
    }

    pub fn insert(&mut self, zip: impl Into<String>, city: impl Into<String>, state: impl Into<String>) {
        self.entries.insert(
            zip.into(),
            ZipEntry {
                city: city.into(),
                state: state.into(),
            },
        );
    }

    /// Look up a raw postal code (any accepted spelling).
    pub fn lookup(&self, raw: &str) -> Option<&ZipEntry> {
        normalize_postal(raw).and_then(|key| self.entries.get(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ZipEntry> {
        self.entries.values()
    }
}
