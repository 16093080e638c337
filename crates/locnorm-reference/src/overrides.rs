//! Per-jurisdiction city override rows (`state → raw → canonical`).

use locnorm_core::{Error, Result};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    rows: HashMap<String, HashMap<String, String>>,
    canonical: HashMap<String, HashSet<String>>,
}

impl OverrideTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| Error::Reference(format!("city overrides: {e}")))?;

        let mut table = Self::default();
        for (state, rows) in file {
            let state = state.trim().to_ascii_uppercase();
            for (raw, canonical) in rows {
                table.insert(&state, &raw, &canonical);
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, state: &str, raw: &str, canonical: &str) {
        self.canonical
            .entry(state.to_string())
            .or_default()
            .insert(canonical.to_string());
        self.rows
            .entry(state.to_string())
            .or_default()
            .insert(raw.trim().to_lowercase(), canonical.to_string());
    }

    /// Case-insensitive exact match for `state`.
    pub fn lookup(&self, state: &str, city: &str) -> Option<&str> {
        self.rows
            .get(state)
            .and_then(|rows| rows.get(&city.trim().to_lowercase()))
            .map(String::as_str)
    }

    /// True when `city` is exactly one of the override targets for `state`.
    pub fn is_canonical(&self, state: &str, city: &str) -> bool {
        self.canonical
            .get(state)
            .is_some_and(|values| values.contains(city))
    }

    /// Every `(state, canonical)` override target.
    pub fn canonical_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.canonical
            .iter()
            .flat_map(|(state, values)| values.iter().map(move |v| (state.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_and_scoped() {
        let table = OverrideTable::from_json(
            r#"{"or": {"Milwaukee": "Milwaukie"}, "WI": {"Milw": "Milwaukee"}}"#,
        )
        .unwrap();
        assert_eq!(table.lookup("OR", "MILWAUKEE"), Some("Milwaukie"));
        assert_eq!(table.lookup("WI", "Milwaukee"), None);
        assert_eq!(table.lookup("WI", "milw"), Some("Milwaukee"));
        assert!(table.is_canonical("OR", "Milwaukie"));
        assert!(!table.is_canonical("WI", "Milwaukie"));
        assert_eq!(table.len(), 2);
    }
}
