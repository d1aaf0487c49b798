//! Price/gas feed client, shared between desktop and CLI.
//!
//! Blocking reqwest client (no Tokio runtime required). The public
//! surface returns `Option`: a missing or malformed feed response means
//! "data unavailable", never an error the send flow has to handle.

mod client;
mod watch;

pub use client::{FeedClient, FeedError, GasEstimate};
pub use watch::RequestWatch;
