//! Logging setup for the pkgwiz CLI.
//!
//! Library crates only emit `tracing` events; this module installs the one
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use pkgwiz_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("resolving entries");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "pkgwiz=debug,pkgwiz_entry=debug,pkgwiz_config=debug,pkgwiz_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "pkgwiz=info,pkgwiz_entry=info,pkgwiz_config=info,pkgwiz_cli=info";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for the pkgwiz crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, when set and valid
/// 4. info for the pkgwiz crates
///
/// Must be called once, before any event is emitted.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether log lines may carry ANSI colors.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// capabilities of stderr decide.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
