//! pkgwiz CLI - resolve package entry points and keep `package.json` in sync.
//!
//! This crate wires the entry engine (`pkgwiz-entry`) and the configuration
//! layer (`pkgwiz-config`) into a command-line tool. It does not bundle: the
//! `plan` command emits the build steps a bundler driver should run, and the
//! `exports` command maps the artifacts it produced back into `package.json`.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - one module per subcommand
//! - [`plan`] - build planning over a validated entry
//! - [`backup`] - output directory backup before cleaning
//! - [`manifest`] - reading and writing `package.json`
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines on stderr
//!
//! # Example
//!
//! ```rust
//! use pkgwiz_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod manifest;
pub mod plan;
pub mod ui;

pub use error::{cli_error_to_miette, CliError, Result, ResultExt};
