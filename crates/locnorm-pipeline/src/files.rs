//! Input discovery, brand manifest and collection output.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use locnorm_core::{BrandCollection, Error, Result};
use tracing::{debug, info, warn};

use crate::types::{BrandJob, ManifestEntry};

/// Optional manifest naming brands, categories and display-name handling.
pub const MANIFEST_FILE: &str = "brands.json";

const INPUT_EXTENSIONS: &[&str] = &["geojson", "json"];

/// Raw brand files in `dir`, one per brand key, sorted by key.
/// When both `<key>.geojson` and `<key>.json` exist the `.geojson` wins.
pub fn discover_brand_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILE) {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !INPUT_EXTENSIONS.contains(&ext) {
            continue;
        }
        let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let replace = match found.get(&key) {
            Some(existing) => {
                ext == "geojson" && existing.extension().and_then(|e| e.to_str()) != Some("geojson")
            }
            None => true,
        };
        if replace {
            found.insert(key, path);
        }
    }

    debug!("Found {} brand files in {}", found.len(), dir.display());
    Ok(found.into_iter().collect())
}

/// Read `brands.json` from `dir`, or an empty manifest when absent.
pub fn load_manifest(dir: &Path) -> Result<HashMap<String, ManifestEntry>> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let text = std::fs::read_to_string(&path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::MalformedInput(format!("{}: {e}", path.display())))
}

/// Brand jobs for every raw file in `dir`, with manifest settings applied.
pub fn discover_jobs(dir: &Path) -> Result<Vec<BrandJob>> {
    let mut manifest = load_manifest(dir)?;
    let jobs: Vec<BrandJob> = discover_brand_files(dir)?
        .into_iter()
        .map(|(key, path)| {
            let spec = manifest.remove(&key).unwrap_or_default().into_spec(&key);
            BrandJob { spec, path }
        })
        .collect();

    for key in manifest.keys() {
        warn!("Manifest lists brand '{}' with no input file", key);
    }
    Ok(jobs)
}

/// Write `<dir>/<key>.json`.
pub fn write_collection(dir: &Path, collection: &BrandCollection) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", collection.key));
    let json = serde_json::to_string_pretty(collection)?;
    std::fs::write(&path, json)?;
    info!(
        "Wrote {} locations for '{}' to {}",
        collection.locations.len(),
        collection.key,
        path.display()
    );
    Ok(path)
}

/// Load every brand collection in `dir`, sorted by key. JSON files that are
/// not collections are skipped.
pub fn read_collections(dir: &Path) -> Result<Vec<BrandCollection>> {
    let mut collections = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let text = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<BrandCollection>(&text) {
            Ok(collection) => collections.push(collection),
            Err(e) => warn!("Skipping {}: not a brand collection ({})", path.display(), e),
        }
    }
    collections.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(collections)
}
