//! Error handling for the pkgwiz CLI.
//!
//! Library crates report plain `thiserror` values ([`ConfigError`],
//! [`ValidationFailure`], [`ManifestError`]). This module wraps them into
//! [`CliError`], attaching a hint that tells the user what to change.
//!
//! # Example
//!
//! ```rust,no_run
//! use pkgwiz_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Run `npm init -y` first")
//! }
//! ```

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;

use pkgwiz_config::ConfigError;
use pkgwiz_entry::{EntryShape, ManifestError, ValidationFailure};
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, parsing or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The entry could not be resolved or mapped to exports
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The output directory could not be backed up before cleaning
    #[error("Could not back up {}: {source}\n\nHint: Fix the problem above or pass --force to clean without a backup", .out_dir.display())]
    BackupFailed {
        out_dir: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Entry resolution and export mapping errors.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Nothing declared by the entry exists
    #[error("No valid entries found for {entry}\n\nHint: Check the 'entry' field in pkgwiz.json or pass an ENTRY argument")]
    NoValidEntries { entry: String },

    /// One side of a client/server entry is missing
    #[error("{failure}\n\nHint: A client/server entry needs both its `client` and `server` files")]
    MandatoryMissing { failure: ValidationFailure },

    /// No export map could be derived from the build output
    #[error("Cannot update package.json: {0}\n\nHint: {hint}", hint = manifest_hint(.0))]
    Manifest(#[from] ManifestError),

    /// The project has no `package.json`
    #[error("No package.json found in {}\n\nHint: Run `npm init -y` and try again", .0.display())]
    PackageJsonMissing(PathBuf),

    /// `package.json` exists but its top level is not an object
    #[error("{} is not a JSON object\n\nHint: Fix package.json by hand before running pkgwiz", .0.display())]
    PackageJsonShape(PathBuf),
}

impl EntryError {
    /// Wrap a validation failure for `entry`.
    pub fn validation(entry: &EntryShape, failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::NoValidEntries => EntryError::NoValidEntries {
                entry: entry.to_string(),
            },
            failure @ ValidationFailure::MandatoryMissing { .. } => {
                EntryError::MandatoryMissing { failure }
            }
        }
    }
}

fn manifest_hint(err: &ManifestError) -> &'static str {
    match err {
        ManifestError::NoModuleFormat => "Add esm or cjs to 'formats'; iife builds are not exported",
        ManifestError::DefaultArtifactMissing { .. } => {
            "Run the bundler first, or check 'outDir' and 'formatDir'"
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn an I/O "not found" into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_entries_names_the_entry() {
        let entry = EntryShape::Single("src/missing.ts".to_string());
        let err = EntryError::validation(&entry, ValidationFailure::NoValidEntries);
        let msg = err.to_string();
        assert!(msg.contains("No valid entries found for src/missing.ts"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn mandatory_missing_keeps_the_failure() {
        let entry = EntryShape::Single("unused".to_string());
        let failure = ValidationFailure::MandatoryMissing {
            key: "server".to_string(),
            path: Some("src/server.ts".to_string()),
        };
        let err = EntryError::validation(&entry, failure);
        assert!(matches!(err, EntryError::MandatoryMissing { .. }));
        assert!(err.to_string().contains("`server` was not found at \"src/server.ts\""));
    }

    #[test]
    fn manifest_errors_carry_a_hint() {
        let err: CliError = EntryError::from(ManifestError::NoModuleFormat).into();
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot update package.json"));
        assert!(msg.contains("Hint: Add esm or cjs"));
    }

    #[test]
    fn config_errors_convert() {
        let err: CliError = ConfigError::NotFound.into();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.with_path("package.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(ref p) if p == &PathBuf::from("package.json")));
    }

    #[test]
    fn result_ext_with_path_keeps_other_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(result.with_path("x").unwrap_err(), CliError::Io(_)));
    }

    #[test]
    fn result_ext_with_hint_and_context() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.with_hint("Run pkgwiz init").unwrap_err().to_string();
        assert!(msg.contains("Hint: Run pkgwiz init"));

        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.context("Failed to plan").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to plan: Configuration error"));
    }
}
