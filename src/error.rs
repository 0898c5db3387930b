//! Error type shared by every stage of a poll cycle.

use std::fmt;

/// Errors that can occur while fetching or answering assignments.
#[derive(Debug)]
pub enum TopicError {
    /// Invalid connection settings, or the HTTP client could not be built.
    Configuration(String),
    /// A request could not be sent or its body could not be read.
    Transport {
        /// What was being attempted when the transport failed.
        context: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },
    /// The remote engine answered with a status outside the 2xx group.
    NonSuccessStatus {
        /// Raw HTTP status code.
        status: u16,
        /// Assignment whose post-back failed; `None` for the fetch.
        assignment_id: Option<String>,
    },
    /// A fetched element did not carry a string `id`.
    MalformedAssignment {
        /// Position of the element in the fetched array.
        index: usize,
        /// Why the id could not be extracted.
        reason: String,
    },
    /// The handler's variables could not be encoded as JSON.
    Payload(serde_json::Error),
}

impl TopicError {
    /// Wrap a transport error with a short description of the attempted call.
    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    /// Returns the assignment this error belongs to, if any.
    pub fn assignment_id(&self) -> Option<&str> {
        match self {
            Self::NonSuccessStatus { assignment_id, .. } => assignment_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status for [`TopicError::NonSuccessStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NonSuccessStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::Transport { context, source } => write!(f, "{context}: {source}"),
            Self::NonSuccessStatus {
                status,
                assignment_id: None,
            } => write!(f, "Response code [{status}] is not 200 (Success)"),
            Self::NonSuccessStatus {
                status,
                assignment_id: Some(id),
            } => write!(
                f,
                "Response code [{status}] is not 200 (Success) for assignment [{id}]"
            ),
            Self::MalformedAssignment { index, reason } => {
                write!(f, "Malformed assignment at index {index}: {reason}")
            }
            Self::Payload(e) => write!(f, "Failed to encode result variables: {e}"),
        }
    }
}

impl std::error::Error for TopicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Payload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TopicError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_display() {
        let err = TopicError::NonSuccessStatus {
            status: 404,
            assignment_id: None,
        };
        assert_eq!(err.to_string(), "Response code [404] is not 200 (Success)");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.assignment_id(), None);
    }

    #[test]
    fn test_post_status_carries_assignment() {
        let err = TopicError::NonSuccessStatus {
            status: 500,
            assignment_id: Some("A1".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Response code [500] is not 200 (Success) for assignment [A1]"
        );
        assert_eq!(err.assignment_id(), Some("A1"));
    }

    #[test]
    fn test_malformed_assignment_display() {
        let err = TopicError::MalformedAssignment {
            index: 2,
            reason: "missing field `id`".to_string(),
        };
        assert!(err.to_string().contains("index 2"));
        assert!(std::error::Error::source(&err).is_none());
    }
}
