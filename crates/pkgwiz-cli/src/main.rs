//! pkgwiz CLI - entry resolution and package.json export mapping.
//!
//! Parses the command line, installs logging and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use pkgwiz_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let cwd = args.cwd;
    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args, cwd.as_deref()),
        cli::Command::Merge(merge_args) => commands::merge_execute(merge_args, cwd.as_deref()),
        cli::Command::Plan(plan_args) => commands::plan_execute(plan_args, cwd.as_deref()),
        cli::Command::Exports(exports_args) => {
            commands::exports_execute(exports_args, cwd.as_deref())
        }
        cli::Command::Init(init_args) => commands::init_execute(init_args, cwd.as_deref()),
    };

    result.map_err(error::cli_error_to_miette)
}
