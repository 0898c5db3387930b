//! Public entry point: a configured topic client.
//!
//! [`TopicClient`] pairs an immutable [`ConnectionConfig`] with an optional
//! assignment handler and an explicit [`ErrorStrategy`]. Each call to
//! [`TopicClient::poll`] or [`TopicClient::connect`] runs exactly one cycle.
//!
//! ```no_run
//! use topics_client::{ConnectionConfig, ErrorStrategy, TopicClient};
//!
//! let config = ConnectionConfig::builder("http://localhost", "app1", "topic1")
//!     .username("admin")
//!     .password("admin")
//!     .build()?;
//!
//! let client = TopicClient::new(config, ErrorStrategy::Log).with_handler(|_id, mut vars| {
//!     vars.set("status", "done");
//!     vars
//! });
//!
//! client.connect();
//! # Ok::<(), topics_client::TopicError>(())
//! ```

use std::fmt;

use crate::config::ConnectionConfig;
use crate::error::TopicError;
use crate::polling::{self, HandlerFn};
use crate::server::CycleReport;
use crate::variables::TopicVariables;

/// Boxed assignment handler.
pub type Handler = Box<HandlerFn<'static>>;

/// Boxed error sink.
pub type ErrorSink = Box<dyn Fn(&TopicError) + Send + Sync>;

/// Where [`TopicClient::connect`] delivers errors.
pub enum ErrorStrategy {
    /// Hand each error to a caller-supplied function.
    Sink(ErrorSink),
    /// Log each error at `error` level and carry on.
    Log,
}

impl ErrorStrategy {
    /// Wrap a closure as [`ErrorStrategy::Sink`].
    pub fn sink(f: impl Fn(&TopicError) + Send + Sync + 'static) -> Self {
        Self::Sink(Box::new(f))
    }

    fn deliver(&self, error: &TopicError) {
        match self {
            Self::Sink(sink) => sink(error),
            Self::Log => log::error!("Topic cycle error: {error}"),
        }
    }
}

impl fmt::Debug for ErrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink(_) => f.write_str("Sink(..)"),
            Self::Log => f.write_str("Log"),
        }
    }
}

/// A topic client ready to run cycles.
pub struct TopicClient {
    config: ConnectionConfig,
    handler: Option<Handler>,
    errors: ErrorStrategy,
}

impl TopicClient {
    /// Creates a client without a handler.
    ///
    /// Without a handler, fetched assignments are observed but never
    /// answered.
    pub fn new(config: ConnectionConfig, errors: ErrorStrategy) -> Self {
        Self {
            config,
            handler: None,
            errors,
        }
    }

    /// Attach the function that computes result variables per assignment.
    pub fn with_handler(
        mut self,
        handler: impl Fn(&str, TopicVariables) -> TopicVariables + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Connection settings.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Returns `true` if a handler is attached.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run one cycle and return its structured result.
    ///
    /// The error strategy is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the fetch
    /// fails. Per-assignment failures are in the report.
    pub fn poll(&self) -> Result<CycleReport, TopicError> {
        polling::run_cycle(&self.config, self.handler.as_deref())
    }

    /// Run one cycle, routing every error through the [`ErrorStrategy`].
    ///
    /// Never fails. Returns the report if the fetch phase succeeded.
    pub fn connect(&self) -> Option<CycleReport> {
        match self.poll() {
            Ok(report) => {
                for (_, error) in report.failures() {
                    self.errors.deliver(error);
                }
                Some(report)
            }
            Err(error) => {
                self.errors.deliver(&error);
                None
            }
        }
    }
}

impl fmt::Debug for TopicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicClient")
            .field("config", &self.config)
            .field("has_handler", &self.handler.is_some())
            .field("errors", &self.errors)
            .finish()
    }
}
