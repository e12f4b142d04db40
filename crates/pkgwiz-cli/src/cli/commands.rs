use std::path::PathBuf;

use clap::{Args, Subcommand};
use pkgwiz_entry::Format;

/// Available pkgwiz commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and validate the entry declaration
    ///
    /// Prints the entry kind, the common source root and, for every entry,
    /// the import alias and the output path the bundler will produce.
    Check(CheckArgs),

    /// Write a barrel module re-exporting every entry
    ///
    /// The barrel lands in `.tmp-pkgwiz/merged.entry.ts` and can be bundled
    /// as a single entry.
    Merge(MergeArgs),

    /// Plan the bundler runs for the configured entry
    ///
    /// Validates the entry, backs up and cleans the output directory when
    /// `clean` is set, writes any barrel the build needs and prints the
    /// build steps.
    Plan(PlanArgs),

    /// Write main/module/types/exports into package.json
    ///
    /// Run after the bundler: the fields point at the artifacts found in
    /// the output directory.
    Exports(ExportsArgs),

    /// Create a pkgwiz.json for this project
    Init(InitArgs),
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Entry declaration to check instead of the configured one
    ///
    /// Accepts a path, a glob, a comma-separated list or a JSON (or
    /// JS-like) array/object literal.
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Path to a config file (replaces pkgwiz.json discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Entry declaration to merge instead of the configured one
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Give every list entry a single-identifier alias
    ///
    /// Use this for a barrel that is exposed as one global (iife).
    #[arg(long)]
    pub flatten: bool,

    /// Path to a config file (replaces pkgwiz.json discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Print the plan as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Clean the output directory even if the backup fails
    #[arg(long)]
    pub force: bool,

    /// Path to a config file (replaces pkgwiz.json discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the exports command
#[derive(Args, Debug)]
pub struct ExportsArgs {
    /// Print the updated package.json instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a config file (replaces pkgwiz.json discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Entry declaration (inferred from common locations when omitted)
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<String>,

    /// Output format (repeatable)
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub format: Vec<Format>,

    /// Target platform
    #[arg(long, value_parser = ["node", "browser", "neutral"])]
    pub platform: Option<String>,

    /// Which builds to minify
    #[arg(long, value_parser = ["no", "iife", "all"])]
    pub minify: Option<String>,

    /// Global variable name of the iife build
    #[arg(long, value_name = "NAME")]
    pub global_name: Option<String>,

    /// Bundle every entry through one merged barrel
    #[arg(long)]
    pub merge_in_one: bool,

    /// Emit type declarations
    #[arg(long)]
    pub dts: bool,

    /// Generate source maps
    #[arg(long)]
    pub sourcemap: bool,

    /// Back up and empty the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Rewrite package.json exports after building
    #[arg(long)]
    pub auto_export: bool,

    /// Put each format in its own subdirectory of the output directory
    #[arg(long)]
    pub format_dir: bool,

    /// Overwrite an existing pkgwiz.json
    #[arg(long)]
    pub force: bool,
}
