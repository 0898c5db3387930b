//! HTTP client construction.
//!
//! A fresh blocking client is built for every poll cycle and dropped when
//! the cycle ends. Certificate checks are only relaxed when the caller
//! opted into it through [`TransportOptions::allow_insecure_tls`].
//!
//! Redirects are never followed: a 3xx must reach the status check as-is.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::config::ConnectionConfig;
use crate::error::TopicError;

/// Settings that shape the HTTP client for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Trust any certificate and skip hostname verification.
    pub allow_insecure_tls: bool,
    /// Per-request timeout; `None` keeps the client default.
    pub request_timeout: Option<Duration>,
}

impl From<&ConnectionConfig> for TransportOptions {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            allow_insecure_tls: config.allow_insecure_tls(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Build the HTTP client used for every request of a cycle.
///
/// # Errors
///
/// Returns [`TopicError::Configuration`] if the TLS backend cannot be
/// initialised.
pub fn build_http_client(options: TransportOptions) -> Result<Client, TopicError> {
    let mut builder = Client::builder().redirect(Policy::none());

    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    if options.allow_insecure_tls {
        log::warn!(
            "TLS certificate and hostname verification are DISABLED for this client. \
             Only use this against endpoints with self-signed certificates you control."
        );
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    builder
        .build()
        .map_err(|e| TopicError::Configuration(format!("Failed to create HTTP client: {e}")))
}
