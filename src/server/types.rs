//! Assignment parsing and cycle results.

use serde::Deserialize;
use serde_json::Value;

use crate::error::TopicError;

/// Only the id is read from a fetched element; other fields are ignored.
#[derive(Debug, Deserialize)]
struct AssignmentRecord {
    id: String,
}

/// Parse a fetch body into its elements.
///
/// Anything that is not a JSON array counts as an empty batch.
pub fn parse_batch(body: &str) -> Vec<Value> {
    match serde_json::from_str::<Vec<Value>>(body) {
        Ok(batch) => batch,
        Err(e) => {
            log::warn!("Ignoring malformed assignment list ({e}); treating as empty");
            Vec::new()
        }
    }
}

/// Extract the string `id` of the element at `index`.
pub fn assignment_id(index: usize, element: &Value) -> Result<String, TopicError> {
    AssignmentRecord::deserialize(element)
        .map(|record| record.id)
        .map_err(|e| TopicError::MalformedAssignment {
            index,
            reason: e.to_string(),
        })
}

/// What happened to one fetched assignment.
#[derive(Debug)]
pub enum AssignmentOutcome {
    /// Handler ran and the result was accepted.
    Posted {
        /// Assignment id.
        id: String,
        /// Status of the post-back.
        status: u16,
    },
    /// No handler is configured; nothing was sent.
    Skipped {
        /// Assignment id.
        id: String,
    },
    /// The id could not be read, or the post-back failed.
    Failed {
        /// Assignment id, when it could be extracted.
        id: Option<String>,
        /// Cause.
        error: TopicError,
    },
}

impl AssignmentOutcome {
    /// Assignment id, if known.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Posted { id, .. } | Self::Skipped { id } => Some(id),
            Self::Failed { id, .. } => id.as_deref(),
        }
    }

    /// Returns `true` for [`AssignmentOutcome::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of one fetch-and-drain cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Number of elements in the fetched array.
    pub fetched: usize,
    /// Elements left untouched because the batch was aborted.
    pub unprocessed: usize,
    outcomes: Vec<AssignmentOutcome>,
}

impl CycleReport {
    /// Empty report for a batch of `fetched` elements.
    pub fn new(fetched: usize) -> Self {
        Self {
            fetched,
            unprocessed: 0,
            outcomes: Vec::with_capacity(fetched),
        }
    }

    /// Record the next outcome, in array order.
    pub fn push(&mut self, outcome: AssignmentOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in the order the assignments were fetched.
    pub fn outcomes(&self) -> &[AssignmentOutcome] {
        &self.outcomes
    }

    /// Ids whose results were posted successfully.
    pub fn posted(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|o| match o {
            AssignmentOutcome::Posted { id, .. } => Some(id.as_str()),
            _ => None,
        })
    }

    /// Failed assignments with their cause.
    pub fn failures(&self) -> impl Iterator<Item = (Option<&str>, &TopicError)> {
        self.outcomes.iter().filter_map(|o| match o {
            AssignmentOutcome::Failed { id, error } => Some((id.as_deref(), error)),
            _ => None,
        })
    }

    /// `true` if the batch was cut short by a failure.
    pub fn aborted(&self) -> bool {
        self.unprocessed > 0
    }

    /// `true` if nothing failed.
    pub fn is_clean(&self) -> bool {
        !self.outcomes.iter().any(AssignmentOutcome::is_failure)
    }
}
