//! Terminal output helpers.
//!
//! Status lines go to stderr so that stdout stays clean for machine-readable
//! output (`pkgwiz plan --json`, `pkgwiz exports --dry-run`).

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{debug, error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to whether a
/// user is attached to stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    !is_ci() && console::user_attended_stderr()
}

/// Initialize color support based on `--no-color` and the environment.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
