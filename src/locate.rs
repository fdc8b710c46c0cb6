//! Find the data file that defines a feature identifier.
//!
//! The data root mirrors the identifier namespace: `css.properties.color`
//! lives in `css/properties.json`. A handful of files do not follow the
//! convention and are handled as fallbacks once the plain walk runs out of
//! directories:
//!
//! - `api.X.*` may live in `api/_globals/X.json`;
//! - `html.elements.input.type_X` lives in `html/elements/input/X.json`;
//! - `javascript.builtins.Intl.X.*` and `javascript.builtins.Temporal.X.*`
//!   may live in a file named after `X` next to the failed lookup.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::PrError;

const INPUT_TYPE_PREFIX: &str = "html.elements.input.type_";

/// Locate the file defining `feature` under `root`.
///
/// Returns the path relative to `root`, or `Ok(None)` when no file defines
/// it. With `first_match`, the first `<segment>.json` met on the walk is
/// returned without checking its contents; this is used when the entry may
/// already have been deleted from the file.
///
/// A candidate file that is not valid JSON is an error.
pub fn locate(root: &Path, feature: &str, first_match: bool) -> Result<Option<PathBuf>, PrError> {
    let parts: Vec<&str> = feature.split('.').collect();
    let mut cursor = PathBuf::new();

    for (i, part) in parts.iter().enumerate() {
        let json_rel = cursor.join(format!("{part}.json"));
        let dir_rel = cursor.join(part);

        if root.join(&json_rel).is_file() {
            if first_match {
                debug!(feature, file = %json_rel.display(), "taking first matching file");
                return Ok(Some(json_rel));
            }
            if defines_feature(&root.join(&json_rel), &parts, i)? {
                return Ok(Some(json_rel));
            }
        }

        if root.join(&dir_rel).is_dir() {
            cursor = dir_rel;
            continue;
        }

        debug!(feature, cursor = %cursor.display(), "no directory to descend into; trying fallbacks");
        for candidate in fallback_candidates(feature, &parts, &cursor) {
            let full = root.join(&candidate);
            if full.is_file() && defines_feature(&full, &parts, i)? {
                return Ok(Some(candidate));
            }
        }
        return Ok(None);
    }

    Ok(None)
}

/// Irregularly-named files that may hold `feature`, relative to `root`.
fn fallback_candidates(feature: &str, parts: &[&str], cursor: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if parts[0] == "api" && parts.len() > 1 {
        candidates.push(cursor.join("_globals").join(format!("{}.json", parts[1])));
    }

    if let Some(input_type) = feature.strip_prefix(INPUT_TYPE_PREFIX) {
        let input_type = input_type.split('.').next().unwrap_or(input_type);
        candidates.push(cursor.join(format!("{input_type}.json")));
    }

    let namespaced = feature.starts_with("javascript.builtins.Intl.")
        || feature.starts_with("javascript.builtins.Temporal.");
    if namespaced {
        candidates.push(cursor.join(format!("{}.json", parts[3])));
    }

    candidates
}

/// Whether `path` holds the feature, either under its full dotted path from
/// the document root or starting at the segment the file is named after.
fn defines_feature(path: &Path, parts: &[&str], file_segment: usize) -> Result<bool, PrError> {
    let doc = read_json(path)?;
    Ok(has_path(&doc, parts) || has_path(&doc, &parts[file_segment..]))
}

fn has_path(doc: &Value, parts: &[&str]) -> bool {
    let mut node = doc;
    for part in parts {
        match node.get(part) {
            Some(next) if !next.is_null() => node = next,
            _ => return false,
        }
    }
    true
}

fn read_json(path: &Path) -> Result<Value, PrError> {
    let malformed = |detail: String| PrError::MalformedDataFile {
        path: path.to_path_buf(),
        detail,
    };
    let contents = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| malformed(e.to_string()))
}
