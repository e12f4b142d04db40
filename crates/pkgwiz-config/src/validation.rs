//! Semantic checks on a sanitized configuration.

use std::path::{Component, Path};

use pkgwiz_entry::is_identifier;

use crate::config::WizardConfig;
use crate::error::{ConfigError, Result};

impl WizardConfig {
    /// Reject settings that sanitising cannot fix.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` when `globalName` is not a JavaScript
    /// identifier, or when `outDir` escapes or equals the project root.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.global_name {
            if !is_identifier(name) {
                return Err(ConfigError::invalid(
                    "globalName",
                    format!("`{name}` is not a valid JavaScript identifier"),
                ));
            }
        }

        let out_dir = Path::new(&self.out_dir);
        let escapes = out_dir.is_absolute()
            || out_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        let is_root = out_dir
            .components()
            .all(|c| matches!(c, Component::CurDir));
        if escapes || is_root {
            return Err(ConfigError::invalid(
                "outDir",
                format!("`{}` must be a directory inside the project", self.out_dir),
            ));
        }

        Ok(())
    }
}
