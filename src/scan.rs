//! Input discovery: collects the `.geojson` files of an input tree.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Collects all `.geojson` files in `root` and its immediate
/// subdirectories, sorted by path for a deterministic run order.
///
/// Deeper nesting is not descended into; airport data lives at most one
/// directory below the input root.
///
/// # Errors
///
/// Fails when a directory cannot be read.
pub fn find_geojson_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(root, &mut files)?;

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read input directory {}", root.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, &mut files)?;
        }
    }

    files.sort();
    Ok(files)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "geojson") {
            files.push(path);
        }
    }
    Ok(())
}
