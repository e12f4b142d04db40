//! Entry resolution and export mapping for pkgwiz.
//!
//! Turns a user-declared entry (a path, a list, a glob, a labeled map or a
//! client/server pair) into a validated set of build entry points, derives an
//! import alias for each of them, renders a barrel module that re-exports the
//! whole set and computes the `package.json` export fields that match the
//! built artifacts.
//!
//! The flow through this crate is:
//!
//! 1. [`parse_entry`] normalizes the raw declaration into an [`EntryShape`]
//! 2. [`validate_entry`] keeps only paths that exist and resolves the [`EntryKind`]
//! 3. [`ValidEntry::source_root`] and [`FileParts`] give the alias of each entry
//! 4. [`render_barrel`] / [`write_barrel`] merge several entries into one module
//! 5. [`default_and_exports`] and [`synthesize`] produce a [`ManifestExportPatch`]
//!
//! All file-system access goes through the [`FileSystem`] trait.
//!
//! # Example
//!
//! ```no_run
//! use pkgwiz_entry::{NativeFs, parse_entry_str, validate_entry};
//!
//! let fs = NativeFs::new(".");
//! let shape = parse_entry_str("src/index.ts, src/cli.ts");
//! let entry = validate_entry(&shape, &fs).expect("entries exist");
//! println!("source root: {}", entry.source_root());
//! ```

pub mod barrel;
pub mod check;
pub mod error;
pub mod fs;
mod lenient;
pub mod manifest;
pub mod parse;
pub mod parts;
pub mod paths;
pub mod shape;
pub mod validate;

pub use barrel::{is_identifier, render_barrel, write_barrel, Barrel, BARREL_DIR, BARREL_FILE};
pub use check::{can_merge, infer_entry, is_default_entry, is_glob, is_multi_entry};
pub use error::{ManifestError, ValidationFailure};
pub use fs::{FileSystem, NativeFs};
pub use manifest::{
    default_and_exports, synthesize, DefaultAndExport, ExportConditions, Format,
    ManifestExportPatch, OutputLayout,
};
pub use parse::{parse_entry, parse_entry_str, FALLBACK_ENTRY};
pub use parts::FileParts;
pub use paths::find_source_root;
pub use shape::{ClientServerEntry, EntryKind, EntryRef, EntryShape, Side, ValidEntry};
pub use validate::{expand_glob, validate_entry};

#[cfg(any(test, feature = "test-utils"))]
pub use fs::MemoryFs;
