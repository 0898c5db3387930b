//! One fetch-and-drain cycle against a topic.
//!
//! A cycle has two phases:
//!
//! 1. **Fetch** - GET the topic endpoint and parse the body as a JSON
//!    array. A non-2xx status or a transport error ends the cycle; a body
//!    that is not an array is treated as an empty batch.
//! 2. **Process** - for each element in array order, read its `id`, run
//!    the handler on a fresh [`TopicVariables`], and POST the result to
//!    `endpoint&id=<id>`. Without a handler, elements are only observed.
//!
//! Processing failures are recorded per assignment. Under
//! [`FailurePolicy::AbortOnFirstFailure`] the first one ends the batch.
//!
//! # Design
//!
//! Functions in this module are regular functions (M-REGULAR-FN) over a
//! [`PollContext`], making them independently testable.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::auth::Credentials;
use crate::config::{ConnectionConfig, FailurePolicy, PayloadEncoding};
use crate::error::TopicError;
use crate::server::request::{build_get, build_post, encode_payload};
use crate::server::types::{assignment_id, parse_batch};
use crate::server::{status, AssignmentOutcome, CycleReport, Endpoint};
use crate::transport::{build_http_client, TransportOptions};
use crate::variables::TopicVariables;

/// Signature of an assignment handler: `(assignment id, fresh variables) -> result`.
pub type HandlerFn<'h> = dyn Fn(&str, TopicVariables) -> TopicVariables + Send + Sync + 'h;

/// Everything a cycle needs after the client is built.
#[derive(Debug)]
pub struct PollContext<'a> {
    /// HTTP client shared by every request of the cycle.
    pub client: &'a Client,
    /// Fetch endpoint.
    pub endpoint: &'a Endpoint,
    /// Basic-auth credentials, if any.
    pub credentials: Option<&'a Credentials>,
    /// Behaviour after a failed assignment.
    pub failure_policy: FailurePolicy,
    /// Post-back body encoding.
    pub payload_encoding: PayloadEncoding,
}

/// Run a full cycle: build the client, fetch, and process the batch.
///
/// The client lives only for the duration of this call.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the fetch fails.
/// Failures while processing individual assignments are reported in the
/// returned [`CycleReport`] instead.
pub fn run_cycle(
    config: &ConnectionConfig,
    handler: Option<&HandlerFn<'_>>,
) -> Result<CycleReport, TopicError> {
    let client = build_http_client(TransportOptions::from(config))?;
    let endpoint = Endpoint::for_config(config);

    let ctx = PollContext {
        client: &client,
        endpoint: &endpoint,
        credentials: config.credentials(),
        failure_policy: config.failure_policy(),
        payload_encoding: config.payload_encoding(),
    };

    let batch = fetch_assignments(&ctx)?;
    if !batch.is_empty() {
        log::info!(
            "Fetched {} assignments from topic [{}]",
            batch.len(),
            config.topic()
        );
    }

    let report = process_assignments(&ctx, &batch, handler);
    log::info!(
        "Cycle finished for topic [{}]: {} posted, {} failed, {} unprocessed",
        config.topic(),
        report.posted().count(),
        report.failures().count(),
        report.unprocessed
    );
    Ok(report)
}

/// Fetch pending assignments.
///
/// An empty or malformed body yields an empty batch.
pub fn fetch_assignments(ctx: &PollContext) -> Result<Vec<Value>, TopicError> {
    log::debug!("Fetching assignments from {}", ctx.endpoint);

    let response = build_get(ctx.client, ctx.endpoint.as_str(), ctx.credentials)
        .send()
        .map_err(|e| TopicError::transport("Failed to fetch assignments", e))?;

    let status = response.status().as_u16();
    if !status::is_success(status) {
        return Err(TopicError::NonSuccessStatus {
            status,
            assignment_id: None,
        });
    }

    let body = response
        .text()
        .map_err(|e| TopicError::transport("Failed to read assignment list", e))?;

    if body.trim().is_empty() {
        log::debug!("Fetch returned no body");
        return Ok(Vec::new());
    }

    Ok(parse_batch(&body))
}

/// Process a fetched batch in array order.
pub fn process_assignments(
    ctx: &PollContext,
    batch: &[Value],
    handler: Option<&HandlerFn<'_>>,
) -> CycleReport {
    let mut report = CycleReport::new(batch.len());

    for (index, element) in batch.iter().enumerate() {
        let outcome = process_assignment(ctx, index, element, handler);
        let failed = outcome.is_failure();
        report.push(outcome);

        if failed && ctx.failure_policy == FailurePolicy::AbortOnFirstFailure {
            report.unprocessed = batch.len() - index - 1;
            if report.unprocessed > 0 {
                log::warn!(
                    "Aborting batch after failure at index {index}; {} assignments left unprocessed",
                    report.unprocessed
                );
            }
            break;
        }
    }

    report
}

fn process_assignment(
    ctx: &PollContext,
    index: usize,
    element: &Value,
    handler: Option<&HandlerFn<'_>>,
) -> AssignmentOutcome {
    let id = match assignment_id(index, element) {
        Ok(id) => id,
        Err(error) => return AssignmentOutcome::Failed { id: None, error },
    };

    let Some(handler) = handler else {
        log::debug!("No handler configured, skipping assignment [{id}]");
        return AssignmentOutcome::Skipped { id };
    };

    let variables = handler(&id, TopicVariables::new());

    match post_result(ctx, &id, &variables) {
        Ok(status) => AssignmentOutcome::Posted { id, status },
        Err(error) => AssignmentOutcome::Failed {
            id: Some(id),
            error,
        },
    }
}

/// POST handler output for one assignment.
///
/// Returns the response status on success.
pub fn post_result(
    ctx: &PollContext,
    assignment_id: &str,
    variables: &TopicVariables,
) -> Result<u16, TopicError> {
    let body = encode_payload(variables, ctx.payload_encoding)?;
    let url = ctx.endpoint.for_assignment(assignment_id);

    let response = build_post(ctx.client, &url, Some(&body), ctx.credentials)
        .send()
        .map_err(|e| {
            TopicError::transport(
                format!("Failed to post result for assignment [{assignment_id}]"),
                e,
            )
        })?;

    let status = response.status().as_u16();
    if !status::is_success(status) {
        return Err(TopicError::NonSuccessStatus {
            status,
            assignment_id: Some(assignment_id.to_string()),
        });
    }

    log::debug!(
        "Posted {} variables for assignment [{assignment_id}]",
        variables.len()
    );
    Ok(status)
}
