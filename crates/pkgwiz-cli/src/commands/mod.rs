//! Command implementations.
//!
//! - [`check`] - resolve and validate the entry
//! - [`merge`] - write a barrel module
//! - [`plan`] - plan the bundler runs
//! - [`exports`] - update `package.json`
//! - [`init`] - write `pkgwiz.json`
//!
//! Each command takes its parsed arguments plus the global `--cwd`.

pub mod check;
pub mod exports;
pub mod init;
pub mod merge;
pub mod plan;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use exports::execute as exports_execute;
pub use init::execute as init_execute;
pub use merge::execute as merge_execute;
pub use plan::execute as plan_execute;
