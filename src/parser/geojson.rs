//! Reads one GeoJSON feature collection per input file.

use crate::models::geojson::FeatureCollection;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads and parses a GeoJSON file.
///
/// A file that cannot be read or parsed is fatal for the whole run;
/// per-feature problems are handled downstream as recoverable skips.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid feature
/// collection.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Malformed GeoJSON in {}", path.display()))
}
