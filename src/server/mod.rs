//! Wire-level pieces of the topics protocol.
//!
//! - [`endpoint`] - URL derivation for the fetch and post-back calls
//! - [`request`] - Authenticated GET/POST construction and body encoding
//! - [`status`] - Status-code grouping
//! - [`types`] - Assignment parsing and per-cycle results

pub mod endpoint;
pub mod request;
pub mod status;
pub mod types;

pub use endpoint::Endpoint;
pub use types::{AssignmentOutcome, CycleReport};
