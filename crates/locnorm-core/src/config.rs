//! Configuration and reference/output directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to every reference table the pipeline can load.
///
/// Each file is optional; the reference store falls back to its embedded
/// defaults when a file does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePaths {
    /// Reference directory (e.g., `data/reference/`).
    pub root: PathBuf,
    /// Postal code table (`zip_codes.csv`).
    pub zip_codes: PathBuf,
    /// Nested state → raw city → canonical city map (`city_aliases.json`).
    pub city_aliases: PathBuf,
    /// Jurisdiction bounding boxes (`state_bounds.csv`).
    pub state_bounds: PathBuf,
    /// Curated per-state valid city additions (`valid_cities_supplement.json`).
    pub valid_cities_supplement: PathBuf,
    /// Per-jurisdiction override rows (`city_overrides.json`).
    pub city_overrides: PathBuf,
    /// Curated word lists (`curated_lists.json`).
    pub curated_lists: PathBuf,
}

impl ReferencePaths {
    /// Resolve reference file names under a directory. Does not touch the filesystem.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            zip_codes: root.join("zip_codes.csv"),
            city_aliases: root.join("city_aliases.json"),
            state_bounds: root.join("state_bounds.csv"),
            valid_cities_supplement: root.join("valid_cities_supplement.json"),
            city_overrides: root.join("city_overrides.json"),
            curated_lists: root.join("curated_lists.json"),
            root,
        }
    }
}

/// Top-level locnorm configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocnormConfig {
    /// Root data directory.
    pub data_dir: PathBuf,
    /// Reference table paths.
    pub reference: ReferencePaths,
    /// Where brand collections and reports are written.
    pub output_dir: PathBuf,
    /// Rayon worker count for brand fan-out (0 = rayon default).
    pub workers: usize,
}

impl LocnormConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `LOCNORM_REFERENCE_DIR` defaults to `<data_dir>/reference`,
    /// `LOCNORM_OUTPUT_DIR` to `<data_dir>/output`.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();

        let reference_dir = std::env::var("LOCNORM_REFERENCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("reference"));

        let output_dir = std::env::var("LOCNORM_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("output"));

        let workers = std::env::var("LOCNORM_WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .unwrap_or(0);

        Self {
            reference: ReferencePaths::new(reference_dir),
            output_dir,
            workers,
            data_dir,
        }
    }

    /// Override the output directory (CLI argument wins over environment).
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    /// Create the output directory if needed.
    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_paths_layout() {
        let paths = ReferencePaths::new("/tmp/ref");
        assert_eq!(paths.zip_codes, PathBuf::from("/tmp/ref/zip_codes.csv"));
        assert_eq!(paths.state_bounds, PathBuf::from("/tmp/ref/state_bounds.csv"));
        assert_eq!(paths.root, PathBuf::from("/tmp/ref"));
    }

    #[test]
    fn test_ensure_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = LocnormConfig::from_env(dir.path()).with_output_dir(dir.path().join("out/nested"));
        config.ensure_output_dir().unwrap();
        assert!(dir.path().join("out/nested").is_dir());
    }
}
