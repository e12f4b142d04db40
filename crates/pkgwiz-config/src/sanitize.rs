//! Forgiving conversion of raw JSON into a [`WizardConfig`].
//!
//! Config values come from hand-written files, environment variables and
//! flags. Nothing here fails: unknown values fall back to defaults.

use pkgwiz_entry::{parse_entry, Format};
use serde_json::Value;

use crate::config::{default_formats, Minify, Platform, WizardConfig, DEFAULT_OUT_DIR};

static NULL: Value = Value::Null;

/// Build a config from an arbitrary JSON value.
pub fn sanitize(raw: &Value) -> WizardConfig {
    let field = |name: &str| raw.get(name).unwrap_or(&NULL);

    let formats = sanitize_formats(field("formats"));
    let platform = field("platform")
        .as_str()
        .and_then(Platform::parse)
        .unwrap_or_default();
    let minify = field("minify")
        .as_str()
        .and_then(Minify::parse)
        .unwrap_or_default();
    let out_dir = field("outDir")
        .as_str()
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .unwrap_or(DEFAULT_OUT_DIR)
        .to_string();
    let global_name = truthy(field("globalName")).then(|| match field("globalName") {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    WizardConfig {
        entry: parse_entry(field("entry")),
        merge_in_one: truthy(field("mergeInOne")),
        out_dir,
        formats,
        platform,
        dts: truthy(field("dts")),
        sourcemap: truthy(field("sourcemap")),
        minify,
        clean: truthy(field("clean")),
        auto_export: truthy(field("autoExport")),
        format_dir: truthy(field("formatDir")),
        global_name,
    }
}

/// Known formats, in declaration order, without duplicates.
///
/// A lone string is a one-element list; a comma separated string is split.
fn sanitize_formats(raw: &Value) -> Vec<Format> {
    let names: Vec<&str> = match raw {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(s) => s.split(',').collect(),
        _ => Vec::new(),
    };

    let mut formats = Vec::new();
    for name in names {
        let name = name.trim();
        // case sensitive, like the stored values
        let format = match name {
            "esm" => Format::Esm,
            "cjs" => Format::Cjs,
            "iife" => Format::Iife,
            _ => {
                if !name.is_empty() {
                    tracing::warn!(format = name, "ignoring unknown output format");
                }
                continue;
            }
        };
        if !formats.contains(&format) {
            formats.push(format);
        }
    }

    if formats.is_empty() {
        default_formats()
    } else {
        formats
    }
}

/// JavaScript truthiness.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
