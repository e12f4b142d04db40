//! Build planning.
//!
//! pkgwiz does not run a bundler. It turns the configuration and a validated
//! entry into a [`BuildPlan`]: the ordered bundler invocations (writing the
//! barrel modules they need on the way) plus what manifest synthesis will
//! need once the artifacts exist.

use std::path::Path;

use indexmap::IndexMap;
use pkgwiz_config::{Platform, WizardConfig};
use pkgwiz_entry::{
    default_and_exports, find_source_root, write_barrel, DefaultAndExport, EntryShape, Format,
    Side, ValidEntry, BARREL_DIR, BARREL_FILE,
};
use serde::Serialize;

use crate::error::Result;

/// One bundler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStep {
    pub entry: EntryShape,
    pub platform: Platform,
    pub formats: Vec<Format>,
    pub out_dir: String,
    pub minify: bool,
    pub dts: bool,
    pub sourcemap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// The bundler generates `package.json` exports itself.
    pub exports: bool,
}

/// Inputs of manifest synthesis for a planned build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSource {
    pub split: DefaultAndExport,
    pub source_root: String,
}

/// Everything a bundler driver has to run, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
    pub steps: Vec<BuildStep>,
    /// Project-relative path of the barrel written for this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrel: Option<String>,
    /// Present when pkgwiz, not the bundler, owns the `package.json` exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ManifestSource>,
}

impl BuildPlan {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            barrel: None,
            manifest: None,
        }
    }
}

/// Plan the bundler runs for `entry`.
///
/// - lists and maps are merged into a barrel when `mergeInOne` is set or an
///   `iife` build is requested; with `mergeInOne` the barrel is the only
///   entry, otherwise it only feeds a separate `iife` build
/// - a client/server pair becomes a browser build of the client side and a
///   node build (never `iife`) of the server side
/// - with `formatDir` every format is a step of its own
///
/// Barrels are written under `work_dir`.
pub fn plan_build(config: &WizardConfig, entry: &ValidEntry, work_dir: &Path) -> Result<BuildPlan> {
    let mut plan = BuildPlan::new();
    let source_root = entry.source_root();
    let mut formats = config.formats.clone();
    let simple = !config.format_dir;

    if entry.is_mergeable() && (config.merge_in_one || formats.contains(&Format::Iife)) {
        let barrel = write_barrel(&entry.refs(), &source_root, work_dir, false)?;
        plan.barrel = Some(barrel.entry.clone());
        let merged = EntryShape::Single(barrel.entry.clone());

        if config.merge_in_one {
            tracing::debug!(barrel = %barrel.entry, "building everything from the barrel");
            plan.steps = format_steps(config, merged, config.platform, &formats, simple);
            if !simple {
                plan.manifest = Some(manifest_source(&ValidEntry::Single(barrel.entry)));
            }
            return Ok(plan);
        }

        plan.steps = format_steps(config, merged, config.platform, &[Format::Iife], simple);
        formats.retain(|format| *format != Format::Iife);
        if formats.is_empty() {
            tracing::debug!("iife was the only format");
            return Ok(plan);
        }
    }

    match entry {
        ValidEntry::ClientServer(pair) => {
            let client = side_labels(pair.labels(), pair.side(), Side::Client);
            let server = side_labels(pair.labels(), pair.side(), Side::Server);

            let server_formats: Vec<Format> = formats
                .iter()
                .copied()
                .filter(|format| *format != Format::Iife)
                .collect();
            let mut client_formats = formats.clone();

            if formats.contains(&Format::Iife) && client.len() > 1 {
                let client_entry = ValidEntry::Object(client.clone());
                let client_root = find_source_root(client_entry.paths());
                let barrel = write_barrel(&client_entry.refs(), &client_root, work_dir, true)?;
                plan.steps.extend(format_steps(
                    config,
                    EntryShape::Single(barrel.entry.clone()),
                    Platform::Browser,
                    &[Format::Iife],
                    false,
                ));
                plan.barrel = Some(barrel.entry);
                client_formats = server_formats.clone();
            }

            plan.steps.extend(format_steps(
                config,
                EntryShape::Object(client),
                Platform::Browser,
                &client_formats,
                false,
            ));
            plan.steps.extend(format_steps(
                config,
                EntryShape::Object(server),
                Platform::Node,
                &server_formats,
                false,
            ));
            plan.manifest = Some(manifest_source(entry));
        }
        _ => {
            plan.steps.extend(format_steps(
                config,
                entry.clone().into_shape(),
                config.platform,
                &formats,
                simple,
            ));
            if !simple {
                plan.manifest = Some(manifest_source(entry));
            }
        }
    }

    Ok(plan)
}

/// What manifest synthesis maps after building `entry` with `config`.
///
/// With `mergeInOne` a list or map was bundled from the barrel alone, so
/// the barrel is the one exported entry.
pub fn export_source(config: &WizardConfig, entry: &ValidEntry) -> ManifestSource {
    if config.merge_in_one && entry.is_mergeable() {
        manifest_source(&ValidEntry::Single(format!("{BARREL_DIR}/{BARREL_FILE}")))
    } else {
        manifest_source(entry)
    }
}

/// Default/export split and source root of `entry`.
pub fn manifest_source(entry: &ValidEntry) -> ManifestSource {
    ManifestSource {
        split: default_and_exports(entry),
        source_root: entry.source_root(),
    }
}

/// The labels built for `side`. The default side keeps every extra label,
/// the other side only its own path.
fn side_labels(
    labels: &IndexMap<String, String>,
    default_side: Side,
    side: Side,
) -> IndexMap<String, String> {
    labels
        .iter()
        .filter(|(label, _)| {
            if side == default_side {
                label.as_str() != side.other().label()
            } else {
                label.as_str() == side.label()
            }
        })
        .map(|(label, path)| (label.clone(), path.clone()))
        .collect()
}

fn format_steps(
    config: &WizardConfig,
    entry: EntryShape,
    platform: Platform,
    formats: &[Format],
    exports: bool,
) -> Vec<BuildStep> {
    if formats.is_empty() {
        tracing::debug!(%entry, "no formats left, step skipped");
        return Vec::new();
    }

    let step = |formats: Vec<Format>, out_dir: String, minify: bool| BuildStep {
        entry: entry.clone(),
        platform,
        formats,
        out_dir,
        minify,
        dts: config.dts,
        sourcemap: config.sourcemap,
        global_name: config.global_name.clone(),
        exports: exports && config.auto_export,
    };

    if config.format_dir {
        formats
            .iter()
            .map(|format| {
                step(
                    vec![*format],
                    format!("{}/{}", config.out_dir, format),
                    config.minify.applies_to(*format),
                )
            })
            .collect()
    } else {
        vec![step(
            formats.to_vec(),
            config.out_dir.clone(),
            config.minify == pkgwiz_config::Minify::All,
        )]
    }
}
