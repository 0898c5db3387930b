//! Connection settings for one topic.
//!
//! [`ConnectionConfig`] is immutable once built. Everything the poll cycle
//! needs to know about the remote engine lives here; the handler and error
//! strategy are attached separately on [`crate::TopicClient`].

use std::time::Duration;

use crate::auth::Credentials;
use crate::constants;
use crate::error::TopicError;

/// What to do with the rest of a batch after one assignment fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed assignment; later ones are left untouched.
    #[default]
    AbortOnFirstFailure,
    /// Attempt every assignment and collect the failures.
    ContinueOnFailure,
}

/// How handler variables are encoded into the post-back body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// `{ "name": "value", ... }`.
    #[default]
    Values,
    /// Variable names only, each mapped to `""`. Compatibility mode for
    /// servers that expect the legacy body, which never carried values.
    KeysOnly,
}

/// Settings identifying a topic on a remote engine and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    application_id: String,
    topic: String,
    credentials: Option<Credentials>,
    allow_insecure_tls: bool,
    failure_policy: FailurePolicy,
    payload_encoding: PayloadEncoding,
    request_timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Start building a config for `topic` of `application_id` on `host`.
    pub fn builder(
        host: impl Into<String>,
        application_id: impl Into<String>,
        topic: impl Into<String>,
    ) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            host: host.into(),
            application_id: application_id.into(),
            topic: topic.into(),
            username: None,
            password: None,
            allow_insecure_tls: false,
            failure_policy: FailurePolicy::default(),
            payload_encoding: PayloadEncoding::default(),
            request_timeout: None,
        }
    }

    /// Base URL as given, trailing slash included.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Application hosting the topic.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Topic name.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Basic-auth credentials, present only when a username was set.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether certificate and hostname checks are skipped.
    pub fn allow_insecure_tls(&self) -> bool {
        self.allow_insecure_tls
    }

    /// Behaviour after a failed assignment.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Post-back body encoding.
    pub fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding
    }

    /// Per-request timeout override.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns a copy with environment overrides applied.
    ///
    /// Reads `TOPICS_HOST`, `TOPICS_USERNAME`, `TOPICS_PASSWORD` and
    /// `TOPICS_INSECURE_TLS`. Only the CLI calls this; the library never
    /// consults the environment by itself.
    pub fn apply_env_overrides(self) -> Result<Self, TopicError> {
        let mut builder = ConnectionConfigBuilder::from(self);

        if let Ok(host) = std::env::var(constants::ENV_HOST) {
            builder.host = host;
        }

        if let Ok(username) = std::env::var(constants::ENV_USERNAME) {
            builder.username = Some(username);
        }

        if let Ok(password) = std::env::var(constants::ENV_PASSWORD) {
            builder.password = Some(password);
        }

        if let Ok(insecure) = std::env::var(constants::ENV_INSECURE_TLS) {
            builder.allow_insecure_tls = parse_flag(&insecure);
        }

        builder.build()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Consuming builder for [`ConnectionConfig`].
#[derive(Clone)]
pub struct ConnectionConfigBuilder {
    host: String,
    application_id: String,
    topic: String,
    username: Option<String>,
    password: Option<String>,
    allow_insecure_tls: bool,
    failure_policy: FailurePolicy,
    payload_encoding: PayloadEncoding,
    request_timeout: Option<Duration>,
}

impl ConnectionConfigBuilder {
    /// Username for basic auth. Setting it enables the header.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Password for basic auth. Ignored without a username.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Accept any certificate and skip hostname verification.
    pub fn allow_insecure_tls(mut self, allow: bool) -> Self {
        self.allow_insecure_tls = allow;
        self
    }

    /// Behaviour after a failed assignment.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Post-back body encoding.
    pub fn payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validate and freeze the settings.
    ///
    /// # Errors
    ///
    /// Returns [`TopicError::Configuration`] if the host, application id or
    /// topic is blank.
    pub fn build(self) -> Result<ConnectionConfig, TopicError> {
        for (name, value) in [
            ("host", &self.host),
            ("application id", &self.application_id),
            ("topic", &self.topic),
        ] {
            if value.trim().is_empty() {
                return Err(TopicError::Configuration(format!("{name} must not be empty")));
            }
        }

        let credentials = self
            .username
            .map(|username| Credentials::new(username, self.password.unwrap_or_default()));

        Ok(ConnectionConfig {
            host: self.host,
            application_id: self.application_id,
            topic: self.topic,
            credentials,
            allow_insecure_tls: self.allow_insecure_tls,
            failure_policy: self.failure_policy,
            payload_encoding: self.payload_encoding,
            request_timeout: self.request_timeout,
        })
    }
}

impl std::fmt::Debug for ConnectionConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfigBuilder")
            .field("host", &self.host)
            .field("application_id", &self.application_id)
            .field("topic", &self.topic)
            .field("username", &self.username)
            .field("allow_insecure_tls", &self.allow_insecure_tls)
            .field("failure_policy", &self.failure_policy)
            .field("payload_encoding", &self.payload_encoding)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl From<ConnectionConfig> for ConnectionConfigBuilder {
    fn from(config: ConnectionConfig) -> Self {
        let (username, password) = match config.credentials {
            Some(creds) => {
                let (username, password) = creds.into_parts();
                (Some(username), Some(password))
            }
            None => (None, None),
        };

        Self {
            host: config.host,
            application_id: config.application_id,
            topic: config.topic,
            username,
            password,
            allow_insecure_tls: config.allow_insecure_tls,
            failure_policy: config.failure_policy,
            payload_encoding: config.payload_encoding,
            request_timeout: config.request_timeout,
        }
    }
}
