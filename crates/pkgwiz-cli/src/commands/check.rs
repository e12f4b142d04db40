//! Check command implementation.
//!
//! Resolves the entry and prints what the bundler and the manifest will see
//! for it, without writing anything.

use std::path::Path;

use pkgwiz_entry::manifest::{artifact_name, export_key};
use pkgwiz_entry::{default_and_exports, is_multi_entry, NativeFs, ValidEntry};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

pub fn execute(args: CheckArgs, cwd: Option<&Path>) -> Result<()> {
    let dir = utils::project_dir(cwd)?;
    let loaded = utils::load_config(&dir, args.config)?;
    let fs = NativeFs::new(&dir);

    let shape = utils::entry_shape(args.entry.as_deref(), &loaded, &fs);
    ui::info(&format!("Checking entry {shape}"));
    if is_multi_entry(&shape) {
        tracing::debug!(entries = shape.len(), "multi-entry declaration");
    }

    let entry = utils::validate(&shape, &fs)?;
    print!("{}", report(&entry));

    ui::success("Entry is valid");
    Ok(())
}

/// Kind, source root and one line per entry: path, export key, output path.
fn report(entry: &ValidEntry) -> String {
    let root = entry.source_root();
    let split = default_and_exports(entry);

    let mut out = format!("kind: {}\nsource root: {root}\n", entry.kind());
    for item in split.iter() {
        let key = if item == &split.default {
            ".".to_string()
        } else {
            export_key(item, &root)
        };
        out.push_str(&format!(
            "  {} -> {key} ({})\n",
            item.path(),
            artifact_name(item, &root)
        ));
    }
    out
}
