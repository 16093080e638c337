//! Known-valid (city, state) pairs.

use crate::zip::ZipIndex;
use locnorm_core::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Set of `(lowercased city, state)` pairs derived from the zip index plus a
/// curated supplement.
#[derive(Debug, Clone, Default)]
pub struct ValidCitySet {
    pairs: HashSet<(String, String)>,
    /// States backed by zip-derived data. Supplement rows never add to this.
    states_with_reference: HashSet<String>,
}

impl ValidCitySet {
    pub fn from_zip_index(zips: &ZipIndex) -> Self {
        let mut set = Self::default();
        for entry in zips.entries() {
            set.pairs
                .insert((entry.city.to_lowercase(), entry.state.clone()));
            set.states_with_reference.insert(entry.state.clone());
        }
        set
    }

    /// Merge a `{ "STATE": ["City", ...] }` supplement.
    pub fn add_supplement_json(&mut self, json: &str) -> Result<()> {
        let rows: HashMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| Error::Reference(format!("valid city supplement: {e}")))?;
        for (state, cities) in rows {
            let state = state.trim().to_ascii_uppercase();
            for city in cities {
                self.add_supplement(&city, &state);
            }
        }
        Ok(())
    }

    pub fn add_supplement(&mut self, city: &str, state: &str) {
        self.pairs
            .insert((city.trim().to_lowercase(), state.to_string()));
    }

    /// Case-insensitive membership.
    pub fn contains(&self, city: &str, state: &str) -> bool {
        self.pairs
            .contains(&(city.trim().to_lowercase(), state.to_string()))
    }

    /// True when the zip table covers `state`.
    pub fn has_state(&self, state: &str) -> bool {
        self.states_with_reference.contains(state)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
