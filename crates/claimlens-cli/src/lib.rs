//! Claimlens CLI library.
//!
//! This library provides the core functionality for the `claimlens` command-line
//! interface, including configuration management, state files, command
//! execution, reports and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod report;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use report::{Report, ReportFormat};
pub use session::{Session, SessionFile};
