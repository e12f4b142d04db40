use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Esm,
    Cjs,
    Iife,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Esm, Format::Cjs, Format::Iife];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Esm => "esm",
            Format::Cjs => "cjs",
            Format::Iife => "iife",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esm" => Ok(Format::Esm),
            "cjs" => Ok(Format::Cjs),
            "iife" => Ok(Format::Iife),
            other => Err(format!("unknown format `{other}` (expected esm, cjs or iife)")),
        }
    }
}

/// Where the bundler put its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Output directory, relative to the project root.
    pub out_dir: String,
    /// Artifacts are split into `<out_dir>/<format>/` subdirectories.
    pub format_dir: bool,
    pub formats: Vec<Format>,
    /// The manifest declares `"type": "module"`.
    pub esm_package: bool,
}

impl OutputLayout {
    pub fn has(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }

    /// Whether the manifest's default condition points at the ESM build.
    ///
    /// ESM wins when the package is ESM-typed or when there is no CJS build
    /// to fall back to.
    pub fn default_esm(&self) -> bool {
        self.has(Format::Esm) && (self.esm_package || !self.has(Format::Cjs))
    }

    /// `out_dir` without a leading `./` or trailing slash.
    pub fn out_dir(&self) -> &str {
        let dir = self.out_dir.trim();
        let dir = dir.strip_prefix("./").unwrap_or(dir);
        dir.trim_end_matches('/')
    }

    /// Directory holding the artifacts of `format`, prefixed with `./`.
    pub(crate) fn artifact_dir(&self, format: Format) -> String {
        if self.format_dir {
            format!("./{}/{}", self.out_dir(), format)
        } else {
            format!("./{}", self.out_dir())
        }
    }
}
