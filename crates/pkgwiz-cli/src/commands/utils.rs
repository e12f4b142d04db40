//! Shared utilities for command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use pkgwiz_config::{ConfigLoader, LoadedConfig};
use pkgwiz_entry::{
    infer_entry, parse_entry_str, validate_entry, EntryShape, FileSystem, ValidEntry,
    FALLBACK_ENTRY,
};

use crate::error::{CliError, EntryError, Result};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The project directory: `--cwd` resolved against the process directory.
pub fn project_dir(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = get_cwd()?;
    let Some(cwd) = cwd else {
        return Ok(current);
    };
    let dir = resolve_path(cwd, &current);
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }
    Ok(dir)
}

/// Load and validate the layered configuration of `dir`.
pub fn load_config(dir: &Path, config_file: Option<PathBuf>) -> Result<LoadedConfig> {
    let loaded = ConfigLoader::new(dir).config_file(config_file).load()?;
    loaded.config.validate()?;
    match &loaded.source {
        Some(source) => tracing::debug!(source = %source.path().display(), "configuration loaded"),
        None => tracing::debug!("no configuration file, using defaults"),
    }
    Ok(loaded)
}

/// The entry argument when given, the configured entry otherwise.
///
/// Without any config source the fallback entry is replaced by the first
/// conventional entry file that exists.
pub fn entry_shape<F: FileSystem + ?Sized>(
    arg: Option<&str>,
    loaded: &LoadedConfig,
    fs: &F,
) -> EntryShape {
    if let Some(raw) = arg {
        return parse_entry_str(raw);
    }
    let fallback = EntryShape::Single(FALLBACK_ENTRY.to_string());
    if loaded.source.is_none() && loaded.config.entry == fallback {
        if let Some(inferred) = infer_entry(fs) {
            return EntryShape::Single(inferred.to_string());
        }
    }
    loaded.config.entry.clone()
}

/// Validate `shape`, wrapping failures with a hint.
pub fn validate<F: FileSystem + ?Sized>(shape: &EntryShape, fs: &F) -> Result<ValidEntry> {
    validate_entry(shape, fs).map_err(|failure| EntryError::validation(shape, failure).into())
}

/// Clean an output directory by removing all its contents.
///
/// Creates the directory if it doesn't exist.
pub fn clean_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        if !out_dir.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "Output path exists but is not a directory: {}",
                out_dir.display()
            )));
        }

        for entry in fs::read_dir(out_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    } else {
        fs::create_dir_all(out_dir)?;
    }

    Ok(())
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {e}"),
        ))
    })
}
