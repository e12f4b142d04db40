//! Init command implementation.
//!
//! Writes a `pkgwiz.json` from the command-line options. The options go
//! through the same sanitizing as a hand-written file, so the saved config
//! is exactly what later commands will load.

use std::path::Path;

use pkgwiz_config::{sanitize, WizardConfig, CONFIG_FILE};
use pkgwiz_entry::{infer_entry, parse_entry_str, EntryShape, NativeFs};
use serde_json::{Map, Value};

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Glob used when no conventional entry file exists.
const GLOB_FALLBACK: &str = "src/**/*.ts";

pub fn execute(args: InitArgs, cwd: Option<&Path>) -> Result<()> {
    let dir = utils::project_dir(cwd)?;
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (pass --force to overwrite it)",
            path.display()
        )));
    }

    let fs = NativeFs::new(&dir);
    let entry = match args.entry.as_deref() {
        Some(raw) => parse_entry_str(raw),
        None => match infer_entry(&fs) {
            Some(found) => EntryShape::Single(found.to_string()),
            None => {
                ui::warning(&format!(
                    "No entry file found in the usual places, using {GLOB_FALLBACK}"
                ));
                EntryShape::Single(GLOB_FALLBACK.to_string())
            }
        },
    };

    let config = build_config(&args, entry)?;
    config.validate()?;
    config.save(&path)?;

    ui::success(&format!("Created {}", path.display()));
    eprintln!("{config}");
    Ok(())
}

/// Sanitized config from the init options.
fn build_config(args: &InitArgs, entry: EntryShape) -> Result<WizardConfig> {
    let mut raw = Map::new();
    raw.insert("entry".into(), serde_json::to_value(&entry)?);
    if let Some(out_dir) = &args.out_dir {
        raw.insert("outDir".into(), out_dir.clone().into());
    }
    if !args.format.is_empty() {
        raw.insert("formats".into(), serde_json::to_value(&args.format)?);
    }
    if let Some(platform) = &args.platform {
        raw.insert("platform".into(), platform.clone().into());
    }
    if let Some(minify) = &args.minify {
        raw.insert("minify".into(), minify.clone().into());
    }
    if let Some(name) = &args.global_name {
        raw.insert("globalName".into(), name.clone().into());
    }
    for (key, flag) in [
        ("mergeInOne", args.merge_in_one),
        ("dts", args.dts),
        ("sourcemap", args.sourcemap),
        ("clean", args.clean),
        ("autoExport", args.auto_export),
        ("formatDir", args.format_dir),
    ] {
        raw.insert(key.into(), flag.into());
    }
    Ok(sanitize(&Value::Object(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pkgwiz_config::{Minify, Platform};
    use pkgwiz_entry::Format;

    use crate::cli::{Cli, Command};

    fn init_args(argv: &[&str]) -> InitArgs {
        let mut full = vec!["pkgwiz", "init"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Init(args) => args,
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn defaults_follow_the_config_defaults() {
        let args = init_args(&[]);
        let config = build_config(&args, EntryShape::Single("src/index.ts".into())).unwrap();
        assert_eq!(
            config,
            WizardConfig {
                entry: EntryShape::Single("src/index.ts".into()),
                ..WizardConfig::default()
            }
        );
    }

    #[test]
    fn options_are_carried_over() {
        let args = init_args(&[
            "--out-dir", "lib", "--format", "esm", "--format", "iife", "--platform", "browser",
            "--minify", "all", "--global-name", "MyLib", "--dts", "--format-dir",
        ]);
        let config = build_config(&args, parse_entry_str("src/a.ts,src/b.ts")).unwrap();

        assert_eq!(config.out_dir, "lib");
        assert_eq!(config.formats, vec![Format::Esm, Format::Iife]);
        assert_eq!(config.platform, Platform::Browser);
        assert_eq!(config.minify, Minify::All);
        assert_eq!(config.global_name.as_deref(), Some("MyLib"));
        assert!(config.dts && config.format_dir);
        assert!(!config.clean);
        assert!(matches!(config.entry, EntryShape::Array(ref p) if p.len() == 2));
    }

    #[test]
    fn labeled_entry_round_trips_through_sanitize() {
        let args = init_args(&[]);
        let entry = parse_entry_str("{main: 'src/index.ts', cli: 'src/cli.ts'}");
        let config = build_config(&args, entry.clone()).unwrap();
        assert_eq!(config.entry, entry);
    }
}
