//! Webhook endpoint handler.
//!
//! Validates the delivery's signature, decodes the issue event, and reopens
//! the issue when it was closed without a documentation label. The work runs
//! inline; GitHub sees the response only after the reopen finished or failed.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::effects::GitHubInterpreter;
use crate::webhooks::{ParseError, parse_issue_event, validate_signature};

/// Errors that end webhook processing early.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body could not be read.
    #[error("can't read body: {0}")]
    BodyRead(#[from] BytesRejection),

    /// Missing, duplicated, or mismatched `X-Hub-Signature`.
    #[error("invalid signature")]
    InvalidSignature,

    /// The body is not a decodable event payload.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::BodyRead(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// What the handler did with a delivery that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The payload carried no issue.
    Ignored,
    /// The issue is open, or closed with a documentation label.
    Compliant,
    /// The issue was commented on and reopened.
    Reopened,
    /// Reopening failed; the failure was logged.
    ReopenFailed,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Ignored => "ignored",
            WebhookOutcome::Compliant => "compliant",
            WebhookOutcome::Reopened => "reopened",
            WebhookOutcome::ReopenFailed => "reopen failed",
        }
    }
}

/// Webhook handler for `POST /github_endpoint`.
///
/// # Response
///
/// - 200 OK: delivery handled, including when reopening failed remotely
/// - 400 Bad Request: body unreadable or not a valid event payload
/// - 401 Unauthorized: signature missing, duplicated, or wrong
///
/// The signature is checked before the payload is decoded.
pub async fn webhook_handler<G>(
    State(app_state): State<AppState<G>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, &'static str), WebhookError>
where
    G: GitHubInterpreter + Send + Sync + 'static,
    G::Error: std::error::Error + Send + Sync + 'static,
{
    let body = body.inspect_err(|e| warn!(error = %e, "Error reading body"))?;

    if !validate_signature(&headers, &body, app_state.webhook_secret()) {
        warn!("Rejected webhook with invalid signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event =
        parse_issue_event(&body).inspect_err(|e| warn!(error = %e, "Could not decode event"))?;

    let Some(issue) = event.issue else {
        debug!(action = ?event.action, "Webhook carries no issue, ignoring");
        return Ok((StatusCode::OK, WebhookOutcome::Ignored.as_str()));
    };

    debug!(
        issue = %issue.number,
        action = ?event.action,
        state = ?issue.state,
        labels = issue.labels.len(),
        "Received issue event"
    );

    if !app_state.policy().requires_reopen(&issue) {
        return Ok((StatusCode::OK, WebhookOutcome::Compliant.as_str()));
    }

    info!(issue = %issue.number, "Issue closed without documentation label, reopening");

    let outcome = match app_state.reopener().reopen(issue.number).await {
        Ok(_) => WebhookOutcome::Reopened,
        Err(e) => {
            error!(issue = %issue.number, error = %e, "Got error reopening issue");
            WebhookOutcome::ReopenFailed
        }
    };

    Ok((StatusCode::OK, outcome.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        assert_eq!(
            WebhookError::InvalidSignature.into_response().status(),
            StatusCode::UNAUTHORIZED
        );

        let parse_err = parse_issue_event(b"{").unwrap_err();
        assert_eq!(
            WebhookError::InvalidPayload(parse_err).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn outcome_strings() {
        assert_eq!(WebhookOutcome::Ignored.as_str(), "ignored");
        assert_eq!(WebhookOutcome::Compliant.as_str(), "compliant");
        assert_eq!(WebhookOutcome::Reopened.as_str(), "reopened");
        assert_eq!(WebhookOutcome::ReopenFailed.as_str(), "reopen failed");
    }
}
