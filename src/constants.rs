//! Protocol constants for the topics service.
//!
//! Centralizes the fixed path segments and names the remote workflow
//! engine routes on, plus the environment variables the CLI honours.

// ============================================================================
// Service routing
// ============================================================================

/// Fully qualified class name of the remote plugin serving topics.
///
/// The remote engine dispatches `/plugin/<class>/service` calls by this
/// exact string, so it must match the deployed plugin byte for byte.
pub const PLUGIN_CLASS: &str = "com.kinnara.kecakplugins.topics.TopicsApi";

/// Path prefix for application-scoped JSON endpoints.
pub const APP_PATH_PREFIX: &str = "/web/json/app/";

/// Path segment preceding the plugin class.
pub const PLUGIN_PATH_SEGMENT: &str = "/plugin/";

/// Service suffix and the query key selecting the topic.
pub const SERVICE_TOPIC_QUERY: &str = "/service?topic=";

/// Query key appended for the per-assignment post-back.
pub const ASSIGNMENT_ID_QUERY: &str = "&id=";

// ============================================================================
// Environment overrides (CLI only)
// ============================================================================

/// Overrides the base URL of the remote engine.
pub const ENV_HOST: &str = "TOPICS_HOST";

/// Overrides the Basic-Auth username.
pub const ENV_USERNAME: &str = "TOPICS_USERNAME";

/// Overrides the Basic-Auth password.
pub const ENV_PASSWORD: &str = "TOPICS_PASSWORD";

/// Enables insecure TLS when set to `1` or `true`.
pub const ENV_INSECURE_TLS: &str = "TOPICS_INSECURE_TLS";
