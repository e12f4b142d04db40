//! Manifest export synthesis.
//!
//! After the bundler ran, the artifacts it left in the output directory
//! decide what `package.json` advertises: `main`, `module`, `types` and one
//! conditional `exports` entry per built entry point.

mod defaults;
mod layout;
mod patch;

pub use defaults::{default_and_exports, DefaultAndExport};
pub use layout::{Format, OutputLayout};
pub use patch::{ExportConditions, ManifestExportPatch, PACKAGE_JSON_EXPORT};

use indexmap::IndexMap;

use crate::error::ManifestError;
use crate::fs::FileSystem;
use crate::parts::FileParts;
use crate::shape::EntryRef;

/// Compute the manifest patch for `split` from the artifacts on disk.
///
/// Fails when neither an ESM nor a CJS build is configured, or when the
/// default entry has no artifact for the default condition. Additional
/// entries without any artifact are left out of `exports`.
pub fn synthesize<F: FileSystem + ?Sized>(
    split: &DefaultAndExport,
    source_root: &str,
    layout: &OutputLayout,
    fs: &F,
) -> Result<ManifestExportPatch, ManifestError> {
    if !layout.has(Format::Esm) && !layout.has(Format::Cjs) {
        return Err(ManifestError::NoModuleFormat);
    }
    let default_esm = layout.default_esm();

    let default_name = artifact_name(&split.default, source_root);
    let root = conditions(&default_name, layout, default_esm, fs);
    let Some(main) = root.default.clone() else {
        return Err(ManifestError::DefaultArtifactMissing {
            name: default_name,
            out_dir: layout.out_dir().to_string(),
        });
    };

    let mut exports = IndexMap::new();
    exports.insert(".".to_string(), root.clone());

    for item in &split.exports {
        let name = artifact_name(item, source_root);
        let found = conditions(&name, layout, default_esm, fs);
        if found.is_empty() {
            tracing::warn!(entry = item.path(), %name, "no artifacts found, export skipped");
            continue;
        }
        exports.insert(export_key(item, source_root), found);
    }

    tracing::debug!(%main, exports = exports.len(), "synthesized manifest exports");
    Ok(ManifestExportPatch {
        main,
        module: root.import,
        types: root.types,
        exports,
    })
}

/// Artifact file name (no extension) the bundler produces for an entry.
pub fn artifact_name(item: &EntryRef, source_root: &str) -> String {
    match item {
        EntryRef::Labeled { label, .. } => label.clone(),
        EntryRef::Path(path) => FileParts::from_path(path, source_root).output_path(),
    }
}

/// Subpath key under which an additional entry is exported.
pub fn export_key(item: &EntryRef, source_root: &str) -> String {
    match item {
        EntryRef::Labeled { label, .. } => format!("./{label}"),
        EntryRef::Path(path) => {
            let parts = FileParts::from_path(path, source_root);
            let alias = parts.alias();
            if alias.is_empty() {
                format!("./{}", parts.output_path())
            } else {
                format!("./{alias}")
            }
        }
    }
}

fn conditions<F: FileSystem + ?Sized>(
    name: &str,
    layout: &OutputLayout,
    default_esm: bool,
    fs: &F,
) -> ExportConditions {
    let probe = |candidate: String| fs.exists(&candidate).then_some(candidate);

    let esm_dir = layout.artifact_dir(Format::Esm);
    let cjs_dir = layout.artifact_dir(Format::Cjs);
    let import = probe(format!("{esm_dir}/{name}.mjs"));
    let require = probe(format!("{cjs_dir}/{name}.cjs"));
    let types = probe(format!("{esm_dir}/{name}.d.mts"))
        .or_else(|| probe(format!("{cjs_dir}/{name}.d.cts")));
    let default = if default_esm {
        import.clone()
    } else {
        require.clone()
    };

    ExportConditions {
        import,
        require,
        types,
        default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::shape::ValidEntry;

    fn layout(formats: &[Format], format_dir: bool, esm_package: bool) -> OutputLayout {
        OutputLayout {
            out_dir: "dist".into(),
            format_dir,
            formats: formats.to_vec(),
            esm_package,
        }
    }

    #[test]
    fn single_entry_esm_and_cjs() {
        let fs = MemoryFs::new([
            "dist/index.mjs",
            "dist/index.cjs",
            "dist/index.d.mts",
            "dist/index.d.cts",
        ]);
        let split = default_and_exports(&ValidEntry::Single("src/index.ts".into()));
        let patch = synthesize(&split, "src", &layout(&[Format::Esm, Format::Cjs], false, false), &fs)
            .unwrap();

        assert_eq!(patch.main, "./dist/index.cjs");
        assert_eq!(patch.module.as_deref(), Some("./dist/index.mjs"));
        assert_eq!(patch.types.as_deref(), Some("./dist/index.d.mts"));
        assert_eq!(patch.exports.keys().collect::<Vec<_>>(), ["."]);
    }

    #[test]
    fn esm_package_defaults_to_esm() {
        let fs = MemoryFs::new(["dist/index.mjs", "dist/index.cjs"]);
        let split = default_and_exports(&ValidEntry::Single("src/index.ts".into()));
        let patch = synthesize(&split, "src", &layout(&[Format::Esm, Format::Cjs], false, true), &fs)
            .unwrap();
        assert_eq!(patch.main, "./dist/index.mjs");
        assert_eq!(patch.exports["."].default.as_deref(), Some("./dist/index.mjs"));
    }

    #[test]
    fn split_dirs_and_subpath_exports() {
        let fs = MemoryFs::new([
            "dist/esm/index.mjs",
            "dist/cjs/index.cjs",
            "dist/cjs/index.d.cts",
            "dist/esm/sub/test/index.mjs",
            "dist/esm/cli.mjs",
        ]);
        let entry = ValidEntry::Array(vec![
            "src/cli.ts".into(),
            "src/index.ts".into(),
            "src/sub/test/index.ts".into(),
        ]);
        let split = default_and_exports(&entry);
        let patch = synthesize(&split, "src", &layout(&[Format::Esm, Format::Cjs], true, false), &fs)
            .unwrap();

        assert_eq!(patch.main, "./dist/cjs/index.cjs");
        assert_eq!(patch.types.as_deref(), Some("./dist/cjs/index.d.cts"));
        assert_eq!(
            patch.exports.keys().collect::<Vec<_>>(),
            [".", "./cli", "./sub/test"]
        );
        assert_eq!(
            patch.exports["./sub/test"].import.as_deref(),
            Some("./dist/esm/sub/test/index.mjs")
        );
        assert_eq!(patch.exports["./sub/test"].default, None);
    }

    #[test]
    fn labeled_entries_use_labels() {
        let fs = MemoryFs::new(["dist/main.mjs", "dist/cli.mjs"]);
        let entry = ValidEntry::Object(
            [("main", "src/index.ts"), ("cli", "src/bin/cli.ts")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        let split = default_and_exports(&entry);
        let patch = synthesize(&split, "src", &layout(&[Format::Esm], false, false), &fs).unwrap();
        assert_eq!(patch.main, "./dist/main.mjs");
        assert!(patch.exports.contains_key("./cli"));
    }

    #[test]
    fn missing_entries_are_skipped() {
        let fs = MemoryFs::new(["dist/index.mjs"]);
        let entry = ValidEntry::Array(vec!["src/index.ts".into(), "src/gone.ts".into()]);
        let split = default_and_exports(&entry);
        let patch = synthesize(&split, "src", &layout(&[Format::Esm], false, false), &fs).unwrap();
        assert_eq!(patch.exports.len(), 1);
    }

    #[test]
    fn no_module_format() {
        let fs = MemoryFs::new(["dist/index.global.js"]);
        let split = default_and_exports(&ValidEntry::Single("src/index.ts".into()));
        let err = synthesize(&split, "src", &layout(&[Format::Iife], false, false), &fs).unwrap_err();
        assert_eq!(err, ManifestError::NoModuleFormat);
    }

    #[test]
    fn default_artifact_missing() {
        let fs = MemoryFs::new(["dist/index.mjs"]);
        let split = default_and_exports(&ValidEntry::Single("src/index.ts".into()));
        let err = synthesize(&split, "src", &layout(&[Format::Esm, Format::Cjs], false, false), &fs)
            .unwrap_err();
        assert_eq!(
            err,
            ManifestError::DefaultArtifactMissing {
                name: "index".into(),
                out_dir: "dist".into()
            }
        );
    }
}
