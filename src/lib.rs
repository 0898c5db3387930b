//! Topics client - drains assignments from a remote workflow topic.
//!
//! A remote workflow engine exposes pending work items ("assignments") of
//! an application/topic pair as a pollable HTTP resource. This crate runs
//! one fetch-and-drain cycle at a time: GET the pending assignments, let a
//! caller-supplied handler compute result variables for each, and POST
//! each result back.
//!
//! # Modules
//!
//! - [`client`] - [`TopicClient`], the entry point
//! - [`config`] - Immutable connection settings
//! - [`polling`] - The fetch/process cycle
//! - [`server`] - Endpoint, request, status and result types
//! - [`transport`] - HTTP client construction (TLS policy)
//! - [`auth`] - Basic authentication
//! - [`variables`] - The key/value payload exchanged with handlers
//! - [`error`] - [`TopicError`]

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod polling;
pub mod server;
pub mod transport;
pub mod variables;

// Re-export commonly used types
pub use auth::Credentials;
pub use client::{ErrorSink, ErrorStrategy, Handler, TopicClient};
pub use config::{ConnectionConfig, ConnectionConfigBuilder, FailurePolicy, PayloadEncoding};
pub use error::TopicError;
pub use server::{AssignmentOutcome, CycleReport, Endpoint};
pub use variables::TopicVariables;
