//! File-based config discovery.
//!
//! Finds the wizard configuration in a project directory: a dedicated
//! `pkgwiz.json`, or a `pkgwiz` field in `package.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::WizardConfig;
use crate::error::{ConfigError, Result};
use crate::sanitize::sanitize;

/// Dedicated config file name.
pub const CONFIG_FILE: &str = "pkgwiz.json";

/// Field of `package.json` that may hold the config.
pub const PACKAGE_FIELD: &str = "pkgwiz";

/// Where a config was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A JSON file holding the config at its top level.
    File(PathBuf),
    /// The `pkgwiz` field of a `package.json`.
    PackageJson(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::File(path) | ConfigSource::PackageJson(path) => path,
        }
    }
}

/// Config discovery rooted at a project directory.
///
/// # Example
///
/// ```no_run
/// use pkgwiz_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a usable config.
    ///
    /// Searches in this order:
    /// 1. `pkgwiz.json`
    /// 2. `package.json` (`pkgwiz` field)
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    pub fn find(&self) -> Option<ConfigSource> {
        let config_path = self.root.join(CONFIG_FILE);
        if config_path.exists() {
            match read_json(&config_path) {
                Ok(_) => return Some(ConfigSource::File(config_path)),
                Err(err) => {
                    tracing::warn!("{} exists but could not be parsed, ignoring it: {err}", CONFIG_FILE)
                }
            }
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            match read_json(&pkg_path) {
                Ok(parsed) if parsed.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()) => {
                    return Some(ConfigSource::PackageJson(pkg_path));
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("could not read package.json: {err}"),
            }
        }

        None
    }

    /// Load and sanitize the discovered config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config is found.
    pub fn load(&self) -> Result<WizardConfig> {
        let source = self.find().ok_or(ConfigError::NotFound)?;
        Ok(sanitize(&read_source(&source)?))
    }
}

/// Raw JSON value of a config source.
pub fn read_source(source: &ConfigSource) -> Result<Value> {
    match source {
        ConfigSource::File(path) => read_json(path),
        ConfigSource::PackageJson(path) => {
            let parsed = read_json(path)?;
            parsed
                .get(PACKAGE_FIELD)
                .filter(|v| !v.is_null())
                .cloned()
                .ok_or_else(|| {
                    ConfigError::invalid(
                        PACKAGE_FIELD,
                        format!("add a '{PACKAGE_FIELD}' field to your package.json"),
                    )
                })
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }

    #[test]
    fn package_json_without_field_is_not_a_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x", "pkgwiz": null}"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn broken_config_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"pkgwiz": {"outDir": "lib"}}"#,
        )
        .unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert!(matches!(discovery.find(), Some(ConfigSource::PackageJson(_))));
        assert_eq!(discovery.load().unwrap().out_dir, "lib");
    }
}
