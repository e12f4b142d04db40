//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use pkgwiz_config::ConfigError;

use crate::error::CliError;

/// Convert a `CliError` into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound => miette::miette!(
            "Configuration error: {}\n\nHint: Run `pkgwiz init` or pass --config <path>",
            err
        ),
        ConfigError::Parse { .. } => miette::miette!(
            "Configuration error: {}\n\nHint: Use a JSON validator to check syntax",
            err
        ),
        _ => miette::miette!("Configuration error: {}", err),
    }
}
