//! Assembly types.

use locnorm_core::{AssemblyStats, CanonicalLocation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reasons a raw record does not become a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingCoordinates,
    Placeholder,
    OutsideNorthAmerica,
    Duplicate,
}

impl DropReason {
    /// Checks in the order the assembler applies them.
    pub fn all() -> &'static [DropReason] {
        &[
            Self::MissingCoordinates,
            Self::Placeholder,
            Self::OutsideNorthAmerica,
            Self::Duplicate,
        ]
    }
}

/// Result of assembling one brand's records.
#[derive(Debug, Clone, Default)]
pub struct AssemblyOutput {
    pub locations: Vec<CanonicalLocation>,
    pub stats: AssemblyStats,
    pub duration_ms: u64,
}

/// Per-brand settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSpec {
    pub key: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub category: String,
    /// Emit each POI's `name` tag as `displayName`.
    #[serde(rename = "keepDisplayNames", default)]
    pub keep_display_names: bool,
}

impl BrandSpec {
    /// Defaults for a brand missing from the manifest.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            category: "other".to_string(),
            keep_display_names: false,
            key,
        }
    }
}

/// `brands.json` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "keepDisplayNames", default)]
    pub keep_display_names: bool,
}

impl ManifestEntry {
    pub fn into_spec(self, key: &str) -> BrandSpec {
        let defaults = BrandSpec::from_key(key);
        BrandSpec {
            display_name: self.display_name.unwrap_or(defaults.display_name),
            category: self.category.unwrap_or(defaults.category),
            keep_display_names: self.keep_display_names,
            key: defaults.key,
        }
    }
}

/// One brand to build: its settings and raw input file.
#[derive(Debug, Clone)]
pub struct BrandJob {
    pub spec: BrandSpec,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_reasons_order() {
        let reasons = DropReason::all();
        assert_eq!(reasons.len(), 4);
        assert_eq!(reasons[0], DropReason::MissingCoordinates);
        assert_eq!(reasons[3], DropReason::Duplicate);
    }

    #[test]
    fn test_manifest_entry_defaults() {
        let entry: ManifestEntry =
            serde_json::from_str(r#"{"displayName": "Acme Pizza"}"#).unwrap();
        let spec = entry.into_spec("acme");
        assert_eq!(spec.key, "acme");
        assert_eq!(spec.display_name, "Acme Pizza");
        assert_eq!(spec.category, "other");
        assert!(!spec.keep_display_names);
    }
}
