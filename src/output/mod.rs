//! Output module
//!
//! Renders extracted period records as JSON Lines.
//!
//! # Format
//!
//! - one JSON value per line, each followed by exactly one `\n`
//! - `", "` between items and `": "` after object keys, never pretty-printed
//! - nothing after the final newline; zero records render as zero bytes
//! - UTF-8, scalar values exactly as parsed from the source

mod jsonl;

pub use jsonl::{serialize, write_jsonl, SpacedFormatter, JSONL_EXTENSION};
