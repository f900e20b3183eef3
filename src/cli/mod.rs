//! CLI module
//!
//! Command-line interface hosting both pipeline stages.
//!
//! # Commands
//!
//! - `reshape` - Convert the objects named by an arrival event
//! - `reshape-object` - Convert a single raw object
//! - `land` - Poll the API and land raw responses
//! - `derive-key` - Print the output key for a raw key

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{Runner, EXIT_PARTIAL_FAILURE};
