//! File-system oracle.
//!
//! Validation, glob expansion and artifact lookup only ever ask two
//! questions of the disk: "does this path exist?" and "which files match
//! this pattern?". The [`FileSystem`] trait answers them relative to a
//! project root. [`NativeFs`] talks to the real disk; `MemoryFs` (tests and
//! the `test-utils` feature) keeps a fixed set of files in memory.
//!
//! A failed probe is "not found", never an error.

use std::path::{Path, PathBuf};

use crate::check::is_glob;
use crate::paths::{normalize, to_slash};

/// Existence and glob oracle rooted at a project directory.
pub trait FileSystem: std::fmt::Debug {
    /// Project root all relative paths are resolved against.
    fn root(&self) -> &Path;

    /// Check if a (root-relative) path exists.
    ///
    /// Blank paths and glob patterns never exist.
    fn exists(&self, path: &str) -> bool;

    /// Expand a glob pattern into root-relative file paths.
    ///
    /// Only files are returned, with forward slashes, in sorted order.
    fn glob(&self, pattern: &str) -> Vec<String>;
}

/// [`FileSystem`] backed by `std::fs` and the `glob` crate.
#[derive(Debug, Clone)]
pub struct NativeFs {
    root: PathBuf,
}

impl NativeFs {
    /// Create an oracle rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a root-relative path. Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystem for NativeFs {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &str) -> bool {
        let trimmed = path.trim();
        if trimmed.is_empty() || is_glob(trimmed) {
            return false;
        }
        self.resolve(trimmed).exists()
    }

    fn glob(&self, pattern: &str) -> Vec<String> {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let root = glob::Pattern::escape(&to_slash(&self.root.to_string_lossy()));
            format!("{}/{}", root.trim_end_matches('/'), pattern.trim_start_matches("./"))
        };

        let Ok(paths) = glob::glob(&full_pattern) else {
            tracing::debug!(pattern, "invalid glob pattern");
            return Vec::new();
        };

        let mut files: Vec<String> = paths
            .flatten()
            .filter(|path| path.is_file())
            .map(|path| {
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                normalize(&relative.to_string_lossy())
            })
            .collect();
        files.sort();
        files
    }
}

/// In-memory [`FileSystem`] holding a fixed list of files.
///
/// Directories exist implicitly when a file lives below them.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    root: PathBuf,
    files: std::collections::BTreeSet<String>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryFs {
    /// Create an in-memory tree containing `files`.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root: PathBuf::from("."),
            files: files.into_iter().map(|f| normalize(f.as_ref())).collect(),
        }
    }

    /// Add a file.
    pub fn insert(&mut self, path: &str) {
        self.files.insert(normalize(path));
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl FileSystem for MemoryFs {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &str) -> bool {
        let trimmed = path.trim();
        if trimmed.is_empty() || is_glob(trimmed) {
            return false;
        }
        let wanted = normalize(trimmed);
        let dir_prefix = format!("{wanted}/");
        self.files
            .iter()
            .any(|file| *file == wanted || file.starts_with(&dir_prefix))
    }

    fn glob(&self, pattern: &str) -> Vec<String> {
        let Ok(pattern) = glob::Pattern::new(pattern.trim_start_matches("./")) else {
            return Vec::new();
        };
        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..Default::default()
        };
        self.files
            .iter()
            .filter(|file| pattern.matches_with(file, options))
            .cloned()
            .collect()
    }
}
