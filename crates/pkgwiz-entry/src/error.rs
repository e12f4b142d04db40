//! Failure values produced by validation and manifest synthesis.
//!
//! Parsing never fails, so it has no error type. Validation and synthesis
//! return these as plain `Result` errors for the caller to report.

use thiserror::Error;

/// Why a declared entry could not be turned into a [`crate::ValidEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// None of the declared paths exist (or a glob matched nothing).
    #[error("no valid entries were found")]
    NoValidEntries,

    /// One side of a client/server pair is missing. Both sides are required.
    #[error("required entry `{key}` was not found{}", at_path(.path))]
    MandatoryMissing {
        /// `client` or `server`
        key: String,
        /// The declared path, when the key was declared at all
        path: Option<String>,
    },
}

fn at_path(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" at \"{path}\""),
        None => String::new(),
    }
}

/// Why no manifest patch could be computed after a build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// Neither `esm` nor `cjs` output is active.
    #[error("no esm or cjs output format is active")]
    NoModuleFormat,

    /// The default entry has no artifact in the output directory.
    #[error("default files not found for `{name}` in `{out_dir}`")]
    DefaultArtifactMissing {
        /// Artifact name of the default entry (without extension)
        name: String,
        /// Output directory that was searched
        out_dir: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_missing_mentions_path_when_known() {
        let err = ValidationFailure::MandatoryMissing {
            key: "server".to_string(),
            path: Some("src/server.ts".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "required entry `server` was not found at \"src/server.ts\""
        );

        let err = ValidationFailure::MandatoryMissing {
            key: "server".to_string(),
            path: None,
        };
        assert_eq!(err.to_string(), "required entry `server` was not found");
    }
}
