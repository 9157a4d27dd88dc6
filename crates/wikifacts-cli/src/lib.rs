//! Wikifacts CLI library.
//!
//! Configuration, storage wiring, command execution and output formatting for
//! the `wikifacts` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod store;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use store::ArchiveStore;
