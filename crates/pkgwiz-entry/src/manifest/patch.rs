use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key of the manifest's self export.
pub const PACKAGE_JSON_EXPORT: &str = "./package.json";

/// Conditional export paths of one entry. Absent artifacts are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ExportConditions {
    pub fn is_empty(&self) -> bool {
        self.import.is_none()
            && self.require.is_none()
            && self.types.is_none()
            && self.default.is_none()
    }
}

/// Manifest fields derived from the build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestExportPatch {
    pub main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    /// `"."` first, then every additional export in order.
    pub exports: IndexMap<String, ExportConditions>,
}

impl ManifestExportPatch {
    /// Merge the patch into a parsed `package.json`.
    ///
    /// `module` and `types` are removed when the build produced no matching
    /// artifact, so a stale path never survives a rebuild.
    /// `exports` is replaced wholesale and ends with the `./package.json`
    /// self export (an existing value for it is kept). `out_dir` is added to
    /// `files` when missing.
    pub fn apply(&self, manifest: &mut Map<String, Value>, out_dir: &str) {
        manifest.insert("main".to_string(), Value::String(self.main.clone()));
        set_or_remove(manifest, "module", self.module.as_deref());
        set_or_remove(manifest, "types", self.types.as_deref());

        let self_export = manifest
            .get("exports")
            .and_then(|exports| exports.get(PACKAGE_JSON_EXPORT))
            .cloned()
            .unwrap_or_else(|| Value::String(PACKAGE_JSON_EXPORT.to_string()));

        let mut exports = Map::new();
        for (key, conditions) in &self.exports {
            let value = serde_json::to_value(conditions).unwrap_or(Value::Null);
            exports.insert(key.clone(), value);
        }
        exports.insert(PACKAGE_JSON_EXPORT.to_string(), self_export);
        manifest.insert("exports".to_string(), Value::Object(exports));

        let files = manifest
            .entry("files")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !files.is_array() {
            *files = Value::Array(Vec::new());
        }
        if let Value::Array(list) = files {
            if !list.iter().any(|item| item.as_str() == Some(out_dir)) {
                list.push(Value::String(out_dir.to_string()));
            }
        }
    }
}

fn set_or_remove(manifest: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    match value {
        Some(value) => {
            manifest.insert(key.to_string(), Value::String(value.to_string()));
        }
        None => {
            manifest.shift_remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch() -> ManifestExportPatch {
        let mut exports = IndexMap::new();
        exports.insert(
            ".".to_string(),
            ExportConditions {
                import: Some("./dist/index.mjs".into()),
                default: Some("./dist/index.mjs".into()),
                ..Default::default()
            },
        );
        exports.insert(
            "./cli".to_string(),
            ExportConditions {
                require: Some("./dist/cli.cjs".into()),
                ..Default::default()
            },
        );
        ManifestExportPatch {
            main: "./dist/index.mjs".into(),
            module: Some("./dist/index.mjs".into()),
            types: None,
            exports,
        }
    }

    #[test]
    fn apply_rewrites_export_fields_and_keeps_the_rest() {
        let mut manifest = json!({
            "name": "demo",
            "types": "./old.d.ts",
            "exports": {"./old": "./old.js", "./package.json": {"default": "./package.json"}},
            "version": "1.0.0"
        });
        let map = manifest.as_object_mut().unwrap();
        patch().apply(map, "dist");

        assert_eq!(
            manifest,
            json!({
                "name": "demo",
                "exports": {
                    ".": {"import": "./dist/index.mjs", "default": "./dist/index.mjs"},
                    "./cli": {"require": "./dist/cli.cjs"},
                    "./package.json": {"default": "./package.json"}
                },
                "version": "1.0.0",
                "main": "./dist/index.mjs",
                "module": "./dist/index.mjs",
                "files": ["dist"]
            })
        );
        let keys: Vec<&String> = manifest.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "exports", "version", "main", "module", "files"]);
    }

    #[test]
    fn apply_drops_module_and_types_without_artifacts() {
        let mut manifest = json!({
            "module": "./dist/old.mjs",
            "types": "./dist/old.d.ts"
        });
        let mut bare = patch();
        bare.module = None;
        bare.types = None;
        bare.apply(manifest.as_object_mut().unwrap(), "dist");

        let map = manifest.as_object().unwrap();
        assert!(!map.contains_key("module"));
        assert!(!map.contains_key("types"));
        assert_eq!(map["main"], json!("./dist/index.mjs"));

        let mut typed = patch();
        typed.types = Some("./dist/index.d.ts".into());
        typed.apply(manifest.as_object_mut().unwrap(), "dist");
        assert_eq!(manifest["types"], json!("./dist/index.d.ts"));
        assert_eq!(manifest["module"], json!("./dist/index.mjs"));
    }

    #[test]
    fn apply_appends_out_dir_once() {
        let mut manifest = Map::new();
        manifest.insert("files".into(), json!(["README.md", "dist"]));
        patch().apply(&mut manifest, "dist");
        assert_eq!(manifest["files"], json!(["README.md", "dist"]));

        manifest.insert("files".into(), json!("dist"));
        patch().apply(&mut manifest, "dist");
        assert_eq!(manifest["files"], json!(["dist"]));
        assert_eq!(manifest["exports"]["./package.json"], json!("./package.json"));
    }
}
