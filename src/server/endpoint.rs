//! Service URL derivation.
//!
//! The endpoint is never stored on the config; it is derived when a cycle
//! starts. Application id and topic are interpolated verbatim.

use std::fmt;

use crate::config::ConnectionConfig;
use crate::constants::{
    APP_PATH_PREFIX, ASSIGNMENT_ID_QUERY, PLUGIN_CLASS, PLUGIN_PATH_SEGMENT, SERVICE_TOPIC_QUERY,
};

/// Fetch URL for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Derive the endpoint from raw parts.
    pub fn new(host: &str, application_id: &str, topic: &str) -> Self {
        Self(format!(
            "{}{APP_PATH_PREFIX}{application_id}{PLUGIN_PATH_SEGMENT}{PLUGIN_CLASS}{SERVICE_TOPIC_QUERY}{topic}",
            normalize_host(host)
        ))
    }

    /// Derive the endpoint for a connection config.
    pub fn for_config(config: &ConnectionConfig) -> Self {
        Self::new(config.host(), config.application_id(), config.topic())
    }

    /// The fetch URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Post-back URL for a single assignment.
    pub fn for_assignment(&self, assignment_id: &str) -> String {
        format!("{}{ASSIGNMENT_ID_QUERY}{assignment_id}", self.0)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip exactly one trailing slash from `host`.
pub fn normalize_host(host: &str) -> &str {
    host.strip_suffix('/').unwrap_or(host)
}
