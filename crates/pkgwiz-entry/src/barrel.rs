//! Barrel module generation.
//!
//! A barrel is one synthetic source file that re-exports several entries,
//! so that a multi-entry package can be bundled as a single module (for an
//! `iife` build, or when the user asks for everything merged in one file).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::parts::FileParts;
use crate::paths::{normalize, relative_segments};
use crate::shape::EntryRef;

/// Scratch directory, relative to the project root, holding the barrel.
pub const BARREL_DIR: &str = ".tmp-pkgwiz";

/// File name of the generated barrel.
pub const BARREL_FILE: &str = "merged.entry.ts";

const HEADER: &str = "// Auto-generated barrel by pkgwiz - do not edit";

/// A barrel written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barrel {
    /// Absolute (work dir joined) location of the file.
    pub path: PathBuf,
    /// Project-relative path, usable as a new `Single` entry.
    pub entry: String,
}

/// Render the barrel source for `entries`.
///
/// `barrel_dir` is the project-relative directory the barrel will live in;
/// import specifiers are relative to it. With `flatten`, list entries get a
/// single-identifier alias so the result can be exposed as one global.
/// Without it, an `index` file is re-exported bare, at any depth.
pub fn render_barrel(
    entries: &[EntryRef],
    source_root: &str,
    barrel_dir: &str,
    flatten: bool,
) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for entry in entries {
        let specifier = format!(
            "./{}",
            relative_segments(barrel_dir, &normalize(entry.path())).join("/")
        );
        let alias = match entry {
            EntryRef::Labeled { label, .. } => Some(label.clone()),
            EntryRef::Path(path) => {
                let parts = FileParts::from_path(path, source_root);
                if flatten {
                    Some(parts.flat_alias())
                } else if parts.is_index() {
                    None
                } else {
                    Some(parts.alias())
                }
            }
        };

        match alias {
            Some(alias) => {
                out.push_str(&format!(
                    "export * as {} from {};\n",
                    export_name(&alias),
                    quote(&specifier)
                ));
            }
            None => out.push_str(&format!("export * from {};\n", quote(&specifier))),
        }
    }

    out
}

/// Render and write the barrel under `work_dir`.
///
/// The directory is created if needed and an existing barrel is replaced.
pub fn write_barrel(
    entries: &[EntryRef],
    source_root: &str,
    work_dir: &Path,
    flatten: bool,
) -> io::Result<Barrel> {
    let content = render_barrel(entries, source_root, BARREL_DIR, flatten);
    let dir = work_dir.join(BARREL_DIR);
    fs::create_dir_all(&dir)?;

    let path = dir.join(BARREL_FILE);
    fs::write(&path, content)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "wrote barrel");

    Ok(Barrel {
        path,
        entry: format!("{BARREL_DIR}/{BARREL_FILE}"),
    })
}

/// An identifier as is, anything else as a string literal.
fn export_name(alias: &str) -> String {
    if is_identifier(alias) {
        alias.to_string()
    } else {
        quote(alias)
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Whether `s` is a plain JavaScript identifier (ASCII only).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<EntryRef> {
        items.iter().map(|p| EntryRef::Path(p.to_string())).collect()
    }

    #[test]
    fn list_barrel_uses_path_aliases() {
        let entries = paths(&["src/index.ts", "src/cli.ts", "src/sub/test/index.ts"]);
        let out = render_barrel(&entries, "src", BARREL_DIR, false);
        insta::assert_snapshot!(out, @r#"
        // Auto-generated barrel by pkgwiz - do not edit
        export * from "./../src/index.ts";
        export * as cli from "./../src/cli.ts";
        export * from "./../src/sub/test/index.ts";
        "#);
    }

    #[test]
    fn nested_index_is_bare_unless_flattened() {
        let entries = paths(&["src/cli.ts", "src/sub/test/index.ts"]);

        let out = render_barrel(&entries, "src", BARREL_DIR, false);
        assert!(out.contains("export * from \"./../src/sub/test/index.ts\";\n"));
        assert!(!out.contains("\"sub/test\""));

        let out = render_barrel(&entries, "src", BARREL_DIR, true);
        assert!(out.contains("export * as sub_test_index from \"./../src/sub/test/index.ts\";\n"));
    }

    #[test]
    fn flattened_barrel_uses_identifiers() {
        let entries = paths(&["src/index.ts", "src/utils/math-helpers.ts"]);
        let out = render_barrel(&entries, "src", BARREL_DIR, true);
        insta::assert_snapshot!(out, @r#"
        // Auto-generated barrel by pkgwiz - do not edit
        export * as index from "./../src/index.ts";
        export * as utils_math_helpers from "./../src/utils/math-helpers.ts";
        "#);
    }

    #[test]
    fn labeled_barrel_uses_labels() {
        let entries = vec![
            EntryRef::labeled("main", "src/index.ts"),
            EntryRef::labeled("my-cli", "lib/cli.ts"),
        ];
        let out = render_barrel(&entries, ".", BARREL_DIR, false);
        insta::assert_snapshot!(out, @r#"
        // Auto-generated barrel by pkgwiz - do not edit
        export * as main from "./../src/index.ts";
        export * as "my-cli" from "./../lib/cli.ts";
        "#);
    }

    #[test]
    fn rendering_is_deterministic() {
        let entries = paths(&["src/a.ts", "src/b/c.ts"]);
        assert_eq!(
            render_barrel(&entries, "src", BARREL_DIR, true),
            render_barrel(&entries, "src", BARREL_DIR, true)
        );
    }

    #[test]
    fn write_replaces_previous_barrel() {
        let dir = TempDir::new().unwrap();
        let first = write_barrel(&paths(&["src/a.ts", "src/b.ts"]), "src", dir.path(), false)
            .unwrap();
        let second = write_barrel(&paths(&["src/a.ts"]), "src", dir.path(), false).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.entry, ".tmp-pkgwiz/merged.entry.ts");
        let content = fs::read_to_string(&second.path).unwrap();
        assert!(content.ends_with("export * as a from \"./../src/a.ts\";\n"));
        assert!(!content.contains("b.ts"));
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("utils_math"));
        assert!(is_identifier("$x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("sub/test"));
        assert!(!is_identifier(""));
    }
}
