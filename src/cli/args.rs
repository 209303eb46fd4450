//! CLI argument definitions using clap
//!
//! Commands:
//! - seriesdb describe --series <name>
//! - seriesdb project --series <name> --fields a,b
//! - seriesdb locate  (write requests on stdin, one JSON object per line)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// seriesdb - schema projection and shard placement for trace series
#[derive(Parser, Debug)]
#[command(name = "seriesdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./seriesdb.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the schema view, index rule and entity of a series
    Describe {
        /// Series name
        #[arg(long)]
        series: String,
    },

    /// Project a series' schema onto a subset of its fields
    Project {
        /// Series name
        #[arg(long)]
        series: String,

        /// Comma-separated field names
        #[arg(long, value_delimiter = ',', required = true)]
        fields: Vec<String>,
    },

    /// Locate entity and shard for each write request read from stdin
    Locate,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
