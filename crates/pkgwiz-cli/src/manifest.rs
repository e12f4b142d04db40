//! Reading and writing `package.json`.

use std::fs;
use std::path::{Path, PathBuf};

use pkgwiz_entry::ManifestExportPatch;
use serde_json::{Map, Value};

use crate::error::{EntryError, Result, ResultExt};

pub const PACKAGE_JSON: &str = "package.json";

/// A parsed `package.json`, key order preserved.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    pub path: PathBuf,
    pub fields: Map<String, Value>,
}

impl PackageManifest {
    /// Read `package.json` from `dir`.
    pub fn read(dir: &Path) -> Result<Self> {
        let path = dir.join(PACKAGE_JSON);
        if !path.exists() {
            return Err(EntryError::PackageJsonMissing(dir.to_path_buf()).into());
        }
        let content = fs::read_to_string(&path).with_path(&path)?;
        let value: Value = serde_json::from_str(&content)
            .with_hint(format!("{} is not valid JSON", path.display()))?;
        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            _ => Err(EntryError::PackageJsonShape(path).into()),
        }
    }

    /// Whether the package declares `"type": "module"`.
    pub fn is_esm(&self) -> bool {
        self.fields.get("type").and_then(Value::as_str) == Some("module")
    }

    pub fn apply(&mut self, patch: &ManifestExportPatch, out_dir: &str) {
        patch.apply(&mut self.fields, out_dir);
    }

    /// Pretty JSON with a trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.fields)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.render()?).with_path(&self.path)?;
        tracing::debug!(path = %self.path.display(), "wrote package.json");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;

    #[test]
    fn missing_package_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = PackageManifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Entry(EntryError::PackageJsonMissing(_))));
    }

    #[test]
    fn non_object_package_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), "[]").unwrap();
        let err = PackageManifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Entry(EntryError::PackageJsonShape(_))));
    }

    #[test]
    fn render_keeps_key_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"name": "demo", "type": "module", "version": "1.0.0"}"#,
        )
        .unwrap();
        let manifest = PackageManifest::read(dir.path()).unwrap();
        assert!(manifest.is_esm());
        insta::assert_snapshot!(manifest.render().unwrap(), @r#"
        {
          "name": "demo",
          "type": "module",
          "version": "1.0.0"
        }
        "#);
    }
}
