//! The wizard configuration and its value types.

use std::fmt;
use std::fs;
use std::path::Path;

use pkgwiz_entry::{EntryShape, Format, OutputLayout, FALLBACK_ENTRY};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Target platform handed to the bundler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Node,
    Browser,
    #[default]
    Neutral,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Node => "node",
            Platform::Browser => "browser",
            Platform::Neutral => "neutral",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(Platform::Node),
            "browser" => Some(Platform::Browser),
            "neutral" => Some(Platform::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which builds get minified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Minify {
    No,
    /// Only the `iife` build.
    #[default]
    Iife,
    All,
}

impl Minify {
    pub fn as_str(self) -> &'static str {
        match self {
            Minify::No => "no",
            Minify::Iife => "iife",
            Minify::All => "all",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "no" => Some(Minify::No),
            "iife" => Some(Minify::Iife),
            "all" => Some(Minify::All),
            _ => None,
        }
    }

    /// Whether a build producing only `format` is minified.
    pub fn applies_to(self, format: Format) -> bool {
        match self {
            Minify::No => false,
            Minify::Iife => format == Format::Iife,
            Minify::All => true,
        }
    }
}

impl fmt::Display for Minify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build configuration, as stored in `pkgwiz.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    /// Entry declaration (path, list, glob, labeled map or client/server pair)
    #[serde(default = "default_entry")]
    pub entry: EntryShape,

    /// Bundle every entry through a single merged barrel module
    #[serde(default)]
    pub merge_in_one: bool,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_formats")]
    pub formats: Vec<Format>,

    #[serde(default)]
    pub platform: Platform,

    /// Emit type declarations
    #[serde(default)]
    pub dts: bool,

    #[serde(default)]
    pub sourcemap: bool,

    #[serde(default)]
    pub minify: Minify,

    /// Empty the output directory (after a backup) before building
    #[serde(default)]
    pub clean: bool,

    /// Rewrite `package.json` exports after the build
    #[serde(default)]
    pub auto_export: bool,

    /// Split artifacts into `<outDir>/<format>/`
    #[serde(default)]
    pub format_dir: bool,

    /// Global variable name of the `iife` build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

fn default_entry() -> EntryShape {
    EntryShape::Single(FALLBACK_ENTRY.to_string())
}

fn default_out_dir() -> String {
    DEFAULT_OUT_DIR.to_string()
}

pub(crate) fn default_formats() -> Vec<Format> {
    vec![Format::Esm, Format::Cjs]
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            merge_in_one: false,
            out_dir: default_out_dir(),
            formats: default_formats(),
            platform: Platform::default(),
            dts: false,
            sourcemap: false,
            minify: Minify::default(),
            clean: false,
            auto_export: false,
            format_dir: false,
            global_name: None,
        }
    }
}

impl WizardConfig {
    pub fn has_format(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }

    /// Where artifacts land, for a manifest that is (or is not) ESM-typed.
    pub fn output_layout(&self, esm_package: bool) -> OutputLayout {
        OutputLayout {
            out_dir: self.out_dir.clone(),
            format_dir: self.format_dir,
            formats: self.formats.clone(),
            esm_package,
        }
    }

    /// Write the config as pretty JSON with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::ConfigError::invalid("config", e.to_string()))?;
        json.push('\n');
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

impl fmt::Display for WizardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formats: Vec<&str> = self.formats.iter().map(|f| f.as_str()).collect();
        writeln!(f, "\tFile Entry: {}", self.entry)?;
        writeln!(f, "\tOutput Directory: {}", self.out_dir)?;
        writeln!(f, "\tFormats: {}", formats.join(", "))?;
        writeln!(f, "\tPlatform: {}", self.platform)?;
        writeln!(f, "\tMinify: {}", self.minify)?;
        writeln!(f, "\tType Declaration: {}", yes_no(self.dts))?;
        writeln!(f, "\tGenerate Source Maps: {}", yes_no(self.sourcemap))?;
        writeln!(f, "\tSeparate format outputs: {}", yes_no(self.format_dir))?;
        write!(f, "\tAuto Export: {}", yes_no(self.auto_export))
    }
}
