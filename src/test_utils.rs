//! Shared test utilities.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::github::GitHubApiError;
use crate::types::CommentId;
use crate::webhooks::{compute_signature, format_signature_header};

/// A [`GitHubInterpreter`] that records every effect it is asked to run.
///
/// Clones share the same record, so a test can keep one handle while the
/// other is moved into the server state.
#[derive(Debug, Clone, Default)]
pub struct RecordingInterpreter {
    effects: Arc<Mutex<Vec<GitHubEffect>>>,
    fail_on: Option<&'static str>,
    stall: bool,
}

impl RecordingInterpreter {
    /// Succeeds on every effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails effects whose [`GitHubEffect::operation`] equals `operation`.
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::default()
        }
    }

    /// Never completes any effect.
    pub fn stalling() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    /// Effects seen so far, in call order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.effects.lock().unwrap().clone()
    }
}

impl GitHubInterpreter for RecordingInterpreter {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        let operation = effect.operation();
        let issue = effect.issue();
        self.effects.lock().unwrap().push(effect);

        if self.stall {
            std::future::pending::<()>().await;
        }

        if self.fail_on == Some(operation) {
            return Err(GitHubApiError::without_source(Some(422), "Validation Failed"));
        }

        Ok(match operation {
            "post comment" => GitHubResponse::CommentPosted { id: CommentId(1) },
            _ => GitHubResponse::IssueUpdated { issue },
        })
    }
}

/// Builds a signed `POST /github_endpoint` request.
pub fn signed_webhook_request(secret: &[u8], body: &serde_json::Value) -> Request<Body> {
    let body_bytes = serde_json::to_vec(body).unwrap();
    let signature = compute_signature(&body_bytes, secret).unwrap();

    Request::builder()
        .method("POST")
        .uri("/github_endpoint")
        .header("content-type", "application/json")
        .header("x-github-event", "issues")
        .header("x-hub-signature", format_signature_header(&signature))
        .body(Body::from(body_bytes))
        .unwrap()
}
