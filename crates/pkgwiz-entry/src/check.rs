//! Small predicates over entry declarations.

use crate::fs::FileSystem;
use crate::shape::EntryShape;

/// Paths that count as a package's conventional main entry.
pub const CANDIDATE_ENTRIES: [&str; 5] = [
    "index.ts",
    "src/index.ts",
    "src/main.ts",
    "src/mod.ts",
    "lib/index.ts",
];

/// Probe order used when no entry was declared.
pub const INFER_ORDER: [&str; 5] = [
    "src/index.ts",
    "src/main.ts",
    "src/mod.ts",
    "lib/index.ts",
    "index.ts",
];

/// Whether a path is a glob pattern.
pub fn is_glob(path: &str) -> bool {
    path.contains(['*', '?'])
}

/// Whether the declaration names more than one entry.
///
/// A glob counts even before expansion; a list or map needs two members.
pub fn is_multi_entry(shape: &EntryShape) -> bool {
    match shape {
        EntryShape::Single(path) => is_glob(path),
        EntryShape::Array(_) | EntryShape::Object(_) => shape.len() > 1,
        EntryShape::ClientServer(_) => false,
    }
}

/// Whether the declaration can be merged into one barrel module.
///
/// Client/server pairs never merge: each side is built on its own.
pub fn can_merge(shape: &EntryShape) -> bool {
    !matches!(shape, EntryShape::ClientServer(_)) && is_multi_entry(shape)
}

/// Whether `path` is one of the conventional main entries.
pub fn is_default_entry(path: &str) -> bool {
    let path = path.trim();
    let path = path.strip_prefix("./").unwrap_or(path);
    CANDIDATE_ENTRIES.contains(&path)
}

/// First conventional entry that exists, if any.
pub fn infer_entry<F: FileSystem + ?Sized>(fs: &F) -> Option<&'static str> {
    let found = INFER_ORDER.into_iter().find(|candidate| fs.exists(candidate));
    tracing::debug!(?found, "inferred entry");
    found
}
