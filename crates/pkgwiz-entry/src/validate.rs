//! Entry classification and validation against the file system.

use indexmap::IndexMap;

use crate::check::is_glob;
use crate::error::ValidationFailure;
use crate::fs::FileSystem;
use crate::shape::{ClientServerEntry, EntryShape, ValidEntry, CLIENT, SERVER};

/// Files a glob entry never picks up.
pub const GLOB_IGNORE: [&str; 4] = [
    "**/*.d.ts",
    "**/*.test.ts",
    "**/__tests__/**",
    "**/node_modules/**",
];

/// Expand a glob pattern, dropping declarations, tests and dependencies.
pub fn expand_glob<F: FileSystem + ?Sized>(pattern: &str, fs: &F) -> Vec<String> {
    let ignore: Vec<glob::Pattern> = GLOB_IGNORE
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();

    fs.glob(pattern)
        .into_iter()
        .filter(|path| !ignore.iter().any(|p| p.matches(path)))
        .collect()
}

/// Keep only the declared paths that exist and resolve the entry kind.
///
/// Missing paths in lists and maps are dropped with a warning. The two
/// sides of a client/server pair are mandatory.
pub fn validate_entry<F: FileSystem + ?Sized>(
    shape: &EntryShape,
    fs: &F,
) -> Result<ValidEntry, ValidationFailure> {
    let valid = match shape {
        EntryShape::Single(path) if is_glob(path) => {
            let matches = expand_glob(path, fs);
            if matches.is_empty() {
                tracing::warn!(pattern = %path, "glob pattern matched no files");
                return Err(ValidationFailure::NoValidEntries);
            }
            tracing::debug!(pattern = %path, count = matches.len(), "expanded glob");
            ValidEntry::Array(matches)
        }
        EntryShape::Single(path) => {
            if !fs.exists(path) {
                tracing::warn!(path = %path, "entry not found");
                return Err(ValidationFailure::NoValidEntries);
            }
            ValidEntry::Single(path.trim().to_string())
        }
        EntryShape::Array(paths) => {
            let kept: Vec<String> = paths
                .iter()
                .filter(|path| keep_path(path, fs))
                .map(|path| path.trim().to_string())
                .collect();
            if kept.is_empty() {
                return Err(ValidationFailure::NoValidEntries);
            }
            ValidEntry::Array(kept)
        }
        EntryShape::Object(map) => {
            if let Some(missing) = broken_pair(map) {
                tracing::error!(key = missing, "client/server entry is missing a side");
                return Err(ValidationFailure::MandatoryMissing {
                    key: missing.to_string(),
                    path: None,
                });
            }
            let kept = filter_labels(map, fs);
            if kept.is_empty() {
                return Err(ValidationFailure::NoValidEntries);
            }
            ValidEntry::Object(kept)
        }
        EntryShape::ClientServer(entry) => ValidEntry::ClientServer(validate_pair(entry, fs)?),
    };

    tracing::debug!(kind = %valid.kind(), count = valid.paths().len(), "validated entry");
    Ok(valid)
}

fn validate_pair<F: FileSystem + ?Sized>(
    entry: &ClientServerEntry,
    fs: &F,
) -> Result<ClientServerEntry, ValidationFailure> {
    for key in [CLIENT, SERVER] {
        let path = entry.labels().get(key);
        if !path.is_some_and(|path| fs.exists(path)) {
            tracing::error!(key, path = ?path, "mandatory entry not found");
            return Err(ValidationFailure::MandatoryMissing {
                key: key.to_string(),
                path: path.cloned(),
            });
        }
    }
    Ok(entry.with_labels(filter_labels(entry.labels(), fs)))
}

/// The absent side of a map that declares only one of `client`/`server`.
fn broken_pair(map: &IndexMap<String, String>) -> Option<&'static str> {
    match (map.contains_key(CLIENT), map.contains_key(SERVER)) {
        (true, false) => Some(SERVER),
        (false, true) => Some(CLIENT),
        _ => None,
    }
}

fn filter_labels<F: FileSystem + ?Sized>(
    map: &IndexMap<String, String>,
    fs: &F,
) -> IndexMap<String, String> {
    map.iter()
        .filter(|(_, path)| keep_path(path, fs))
        .map(|(label, path)| (label.clone(), path.trim().to_string()))
        .collect()
}

fn keep_path<F: FileSystem + ?Sized>(path: &str, fs: &F) -> bool {
    if fs.exists(path) {
        return true;
    }
    if is_glob(path) {
        tracing::warn!(path, "glob patterns are not expanded inside entry lists");
    } else {
        tracing::warn!(path, "entry not found, skipping");
    }
    false
}
