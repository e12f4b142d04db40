//! Merge command implementation.

use std::path::Path;

use pkgwiz_entry::{can_merge, write_barrel, NativeFs};

use crate::cli::MergeArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Write the barrel for a list or labeled map and print its path.
///
/// Single entries and client/server pairs are rejected: there is nothing
/// to merge, or the sides are built separately.
pub fn execute(args: MergeArgs, cwd: Option<&Path>) -> Result<()> {
    let dir = utils::project_dir(cwd)?;
    let loaded = utils::load_config(&dir, args.config)?;
    let fs = NativeFs::new(&dir);

    let shape = utils::entry_shape(args.entry.as_deref(), &loaded, &fs);
    if !can_merge(&shape) {
        return Err(CliError::InvalidArgument(format!(
            "{shape} is not a list, glob or labeled map and cannot be merged"
        )));
    }

    let entry = utils::validate(&shape, &fs)?;

    let barrel = write_barrel(&entry.refs(), &entry.source_root(), &dir, args.flatten)?;
    ui::success(&format!(
        "Merged {} entries into {}",
        entry.paths().len(),
        barrel.entry
    ));
    println!("{}", barrel.entry);
    Ok(())
}
