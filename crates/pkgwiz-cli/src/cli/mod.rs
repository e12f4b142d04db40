//! Command-line interface definition for pkgwiz.
//!
//! # Command Structure
//!
//! - `pkgwiz check` - resolve and validate the entry
//! - `pkgwiz merge` - write a barrel module for a multi-entry declaration
//! - `pkgwiz plan` - print the build steps for the bundler
//! - `pkgwiz exports` - map built artifacts into `package.json`
//! - `pkgwiz init` - write a `pkgwiz.json`

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{CheckArgs, Command, ExportsArgs, InitArgs, MergeArgs, PlanArgs};

/// pkgwiz - package entry points and exports, resolved
#[derive(Parser, Debug)]
#[command(
    name = "pkgwiz",
    version,
    about = "Resolve package entry points and keep package.json exports in sync",
    long_about = "pkgwiz reads the entry declaration of a JavaScript/TypeScript package\n\
                  (a path, a list, a glob, a labeled map or a client/server pair),\n\
                  validates it, plans the bundler runs and writes the matching\n\
                  main/module/types/exports fields into package.json."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
