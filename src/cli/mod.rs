//! CLI module for seriesdb
//!
//! Provides command-line interface for:
//! - describe: Print a series' schema view
//! - project: Narrow a schema view to a field subset
//! - locate: Entity and shard placement for writes on stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{describe, locate, project, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_lines, write_error, write_response};
