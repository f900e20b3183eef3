//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// series-lake: land and reshape financial time-series responses
#[derive(Parser, Debug)]
#[command(name = "series-lake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend URL, overrides the config file
    /// Supports: s3://, r2://, gs://, az://, memory://, file:///path
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reshape every object named by an arrival event
    Reshape {
        /// Event file (S3 notification or {"records": [...]})
        #[arg(short, long, conflicts_with = "event_json")]
        event: Option<PathBuf>,

        /// Inline event JSON
        #[arg(long)]
        event_json: Option<String>,
    },

    /// Reshape a single raw object
    ReshapeObject {
        /// Container (bucket) holding the raw object
        #[arg(long)]
        container: String,

        /// Key of the raw object
        #[arg(long)]
        key: String,
    },

    /// Poll the API and land raw responses
    Land {
        /// Fetch once instead of running the timed loop
        #[arg(long)]
        once: bool,
    },

    /// Print the output key derived from a raw key
    DeriveKey {
        /// Raw object key
        #[arg(long)]
        key: String,
    },
}
