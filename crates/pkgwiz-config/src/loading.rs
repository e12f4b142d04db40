//! Layered configuration loading.
//!
//! Priority: overrides (CLI flags) > environment (`PKGWIZ_*`) > config file >
//! defaults. The merged value is sanitized last, so every layer may be as
//! loose as a hand-written file.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde_json::{Map, Value};

use crate::config::WizardConfig;
use crate::discovery::{ConfigDiscovery, ConfigSource, PACKAGE_FIELD};
use crate::error::{ConfigError, Result};
use crate::sanitize::sanitize;

/// Prefix of environment variables read as config values.
pub const ENV_PREFIX: &str = "PKGWIZ_";

const FIELDS: [&str; 12] = [
    "entry",
    "mergeInOne",
    "outDir",
    "formats",
    "platform",
    "dts",
    "sourcemap",
    "minify",
    "clean",
    "autoExport",
    "formatDir",
    "globalName",
];

/// A loaded config and the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: WizardConfig,
    pub source: Option<ConfigSource>,
}

/// Builder for a layered config load.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    config_file: Option<PathBuf>,
    overrides: Map<String, Value>,
    use_env: bool,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_file: None,
            overrides: Map::new(),
            use_env: true,
        }
    }

    /// Use this file instead of discovering one. Relative paths are
    /// resolved against the root.
    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Set a top-level (camelCase) key that wins over every other layer.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.to_string(), value.into());
        self
    }

    /// Skip the environment layer.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn load(&self) -> Result<LoadedConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(WizardConfig::default()));

        let source = self.source()?;
        match &source {
            Some(ConfigSource::File(path)) => {
                tracing::debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Json::file(path));
            }
            Some(ConfigSource::PackageJson(path)) => {
                tracing::debug!(path = %path.display(), "loading config from package.json");
                figment = figment.merge(Figment::from(Json::file(path)).focus(PACKAGE_FIELD));
            }
            None => tracing::debug!("no config file found, using defaults"),
        }

        if self.use_env {
            let env = env_layer();
            if !env.is_empty() {
                tracing::debug!(keys = ?env.keys().collect::<Vec<_>>(), "applying environment overrides");
                figment = figment.merge(Serialized::defaults(Value::Object(env)));
            }
        }

        if !self.overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(Value::Object(self.overrides.clone())));
        }

        let raw: Value = figment.extract().map_err(|e| {
            ConfigError::invalid(
                "configuration",
                format!("{e}. Check pkgwiz.json syntax and field types"),
            )
        })?;

        Ok(LoadedConfig {
            config: sanitize(&raw),
            source,
        })
    }

    fn source(&self) -> Result<Option<ConfigSource>> {
        match &self.config_file {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    self.root.join(path)
                };
                if !path.exists() {
                    return Err(ConfigError::NotFound);
                }
                Ok(Some(ConfigSource::File(path)))
            }
            None => Ok(ConfigDiscovery::new(&self.root).find()),
        }
    }
}

/// `PKGWIZ_OUT_DIR=lib` becomes `{"outDir": "lib"}`. Values that parse as
/// JSON are used as such, anything else is a string.
fn env_layer() -> Map<String, Value> {
    let mut layer = Map::new();
    for (key, raw) in Env::prefixed(ENV_PREFIX).iter() {
        let Some(field) = field_for_env(key.as_str()) else {
            tracing::debug!(key = key.as_str(), "ignoring unknown {ENV_PREFIX} variable");
            continue;
        };
        let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        layer.insert(field.to_string(), value);
    }
    layer
}

fn field_for_env(key: &str) -> Option<&'static str> {
    let wanted: String = key
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    FIELDS
        .into_iter()
        .find(|field| field.to_ascii_lowercase() == wanted)
}
