//! Per-entry alias and output path derivation.

use std::path::Path;

use crate::paths::{normalize, relative_segments, segments};

/// Base name that denotes a directory's own module.
pub const INDEX: &str = "index";

/// An entry path decomposed relative to the source root.
///
/// `parts` are the directory segments between the source root and the file,
/// `base_name` is the file name without its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParts {
    pub parts: Vec<String>,
    pub base_name: String,
}

impl FileParts {
    pub fn new(parts: Vec<String>, base_name: impl Into<String>) -> Self {
        Self {
            parts,
            base_name: base_name.into(),
        }
    }

    /// Decompose `path` relative to `source_root`.
    ///
    /// A path without a directory component has no parts regardless of the
    /// source root.
    pub fn from_path(path: &str, source_root: &str) -> Self {
        let normalized = normalize(path);
        let base_name = Path::new(&normalized)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        if segments(&normalized).len() <= 1 {
            return Self::new(Vec::new(), base_name);
        }

        let mut parts = relative_segments(source_root, &normalized);
        parts.pop();
        Self::new(parts, base_name)
    }

    pub fn is_index(&self) -> bool {
        self.base_name == INDEX
    }

    /// Import-facing alias: directory segments plus the base name, joined
    /// with `/`. A trailing `index` is omitted.
    ///
    /// ```
    /// use pkgwiz_entry::FileParts;
    ///
    /// assert_eq!(FileParts::from_path("src/sub/test/index.ts", "src").alias(), "sub/test");
    /// assert_eq!(FileParts::from_path("src/index.ts", "src").alias(), "");
    /// ```
    pub fn alias(&self) -> String {
        if self.is_index() {
            self.parts.join("/")
        } else {
            self.joined("/")
        }
    }

    /// Output path (no extension): directory segments plus the base name.
    /// `index` is always kept.
    pub fn output_path(&self) -> String {
        self.joined("/")
    }

    /// Single-identifier alias: segments and base name joined with `_`,
    /// every character outside `[A-Za-z0-9_$]` replaced with `_`.
    ///
    /// `index` is kept so sibling directories stay distinguishable.
    pub fn flat_alias(&self) -> String {
        self.joined("_")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn joined(&self, separator: &str) -> String {
        self.parts
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.base_name.as_str()))
            .collect::<Vec<_>>()
            .join(separator)
    }
}
