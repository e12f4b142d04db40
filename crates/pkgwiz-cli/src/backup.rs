//! Output directory backup.
//!
//! Before a clean build empties the output directory, its contents are
//! copied into [`BACKUP_DIR`] at the project root. An earlier backup is
//! overwritten file by file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::commands::utils::clean_output_dir;
use crate::error::{CliError, Result};
use crate::ui;

/// Backup directory, relative to the project root.
pub const BACKUP_DIR: &str = ".pkgwiz-backup";

/// Copy `out_dir` into `<work_dir>/.pkgwiz-backup`.
///
/// Returns `None` when there is no output directory to back up.
pub fn backup_output_dir(out_dir: &Path, work_dir: &Path) -> io::Result<Option<PathBuf>> {
    if !out_dir.exists() {
        return Ok(None);
    }

    let target = work_dir.join(BACKUP_DIR);
    let mut copied = 0usize;
    for entry in WalkDir::new(out_dir) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(out_dir)
            .map_err(io::Error::other)?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            copied += 1;
        }
    }

    tracing::debug!(from = %out_dir.display(), to = %target.display(), files = copied, "backed up output directory");
    Ok(Some(target))
}

/// Back up, then empty, the output directory.
///
/// A failed backup aborts unless `force` is set, in which case the
/// directory is cleaned anyway.
pub fn backup_and_clean(out_dir: &Path, work_dir: &Path, force: bool) -> Result<()> {
    match backup_output_dir(out_dir, work_dir) {
        Ok(Some(target)) => ui::info(&format!("Backed up {} to {}", out_dir.display(), target.display())),
        Ok(None) => tracing::debug!(out_dir = %out_dir.display(), "nothing to back up"),
        Err(source) if force => {
            tracing::warn!(error = %source, "backup failed, cleaning anyway (--force)");
            ui::warning(&format!("Could not back up {}: {source}", out_dir.display()));
        }
        Err(source) => {
            return Err(CliError::BackupFailed {
                out_dir: out_dir.to_path_buf(),
                source,
            });
        }
    }
    clean_output_dir(out_dir)
}
