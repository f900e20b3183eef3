//! Landing module
//!
//! Polls the financial API on a fixed cadence and lands each response,
//! unchanged apart from compact re-encoding, in the blob store. The reshape
//! stage only ever sees what this stage wrote; there is no direct call path
//! between the two.

mod producer;

pub use producer::{LandingProducer, LandingSummary};
