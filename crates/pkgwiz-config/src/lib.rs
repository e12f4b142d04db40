//! Configuration for the pkgwiz build wizard.
//!
//! A [`WizardConfig`] is always the product of [`sanitize`]: whatever the
//! layers ([`ConfigLoader`]) or the discovered file ([`ConfigDiscovery`])
//! contain, unknown or malformed values degrade to defaults rather than
//! failing. [`WizardConfig::validate`] catches what cannot be repaired.

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod sanitize;
pub mod validation;

pub use config::{Minify, Platform, WizardConfig, DEFAULT_OUT_DIR};
pub use discovery::{read_source, ConfigDiscovery, ConfigSource, CONFIG_FILE, PACKAGE_FIELD};
pub use error::{ConfigError, Result};
pub use loading::{ConfigLoader, LoadedConfig, ENV_PREFIX};
pub use sanitize::sanitize;
