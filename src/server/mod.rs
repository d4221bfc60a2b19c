//! HTTP server for the documentation label enforcer.
//!
//! # Endpoints
//!
//! - `POST /github_endpoint` - Accepts GitHub issue webhooks and reopens
//!   issues closed without a documentation label
//! - `GET /whoami` - Returns a fixed identification string

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::effects::GitHubInterpreter;
use crate::policy::LabelPolicy;
use crate::reopen::IssueReopener;

pub mod webhook;
pub mod whoami;

pub use webhook::{WebhookError, WebhookOutcome, webhook_handler};
pub use whoami::{WHOAMI_TEXT, whoami_handler};

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. It is built
/// once from configuration and never mutated.
pub struct AppState<G> {
    inner: Arc<AppStateInner<G>>,
}

struct AppStateInner<G> {
    /// Webhook secret for HMAC-SHA1 signature verification.
    webhook_secret: Vec<u8>,

    reopener: IssueReopener<G>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G> AppState<G>
where
    G: GitHubInterpreter,
{
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `webhook_secret` - Secret for verifying webhook signatures
    /// * `reopener` - Executes the comment and reopen calls
    pub fn new(webhook_secret: impl Into<Vec<u8>>, reopener: IssueReopener<G>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                reopener,
            }),
        }
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    /// Returns the reopener that comments on and reopens issues.
    pub fn reopener(&self) -> &IssueReopener<G> {
        &self.inner.reopener
    }

    /// Returns the label policy enforced on closed issues.
    pub fn policy(&self) -> &LabelPolicy {
        self.inner.reopener.policy()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<G>(app_state: AppState<G>) -> axum::Router
where
    G: GitHubInterpreter + Send + Sync + 'static,
    G::Error: std::error::Error + Send + Sync + 'static,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/github_endpoint", post(webhook_handler::<G>))
        .route("/whoami", get(whoami_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::effects::GitHubEffect;
    use crate::github::{ClientOptions, OctocrabClient};
    use crate::test_utils::{RecordingInterpreter, signed_webhook_request};
    use crate::types::{IssueNumber, RepoId};

    const SECRET: &[u8] = b"test-secret";

    fn test_router(github: RecordingInterpreter) -> axum::Router {
        let reopener = IssueReopener::new(github, LabelPolicy::default(), Duration::from_secs(5));
        build_router(AppState::new(SECRET, reopener))
    }

    fn issue_payload(state: &str, labels: &[&str]) -> serde_json::Value {
        let labels: Vec<_> = labels.iter().map(|name| json!({ "name": name })).collect();
        json!({
            "action": "closed",
            "issue": { "number": 42, "state": state, "labels": labels },
            "repository": { "name": "vic", "owner": { "login": "vmware" } }
        })
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ─── Whoami endpoint tests ───

    #[tokio::test]
    async fn whoami_ignores_request_contents() {
        let app = test_router(RecordingInterpreter::new());

        let request = Request::builder()
            .uri("/whoami")
            .header("x-hub-signature", "sha1=garbage")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, WHOAMI_TEXT);
    }

    // ─── Webhook endpoint tests ───

    #[tokio::test]
    async fn closed_unlabelled_issue_is_reopened_once() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let request = signed_webhook_request(SECRET, &issue_payload("closed", &[]));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "reopened");

        let effects = github.effects();
        assert_eq!(effects.len(), 2);
        assert!(matches!(
            &effects[0],
            GitHubEffect::PostComment { issue: IssueNumber(42), body } if body.contains("docs/no-impact")
        ));
        assert_eq!(
            effects[1],
            GitHubEffect::ReopenIssue {
                issue: IssueNumber(42)
            }
        );
    }

    #[tokio::test]
    async fn closed_labelled_issue_is_left_alone() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let payload = issue_payload("closed", &["kind/bug", "docs/has-impact"]);
        let response = app
            .oneshot(signed_webhook_request(SECRET, &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "compliant");
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn open_issue_is_left_alone_regardless_of_labels() {
        for labels in [&[][..], &["kind/bug"][..], &["docs/no-impact"][..]] {
            let github = RecordingInterpreter::new();
            let app = test_router(github.clone());

            let payload = issue_payload("open", labels);
            let response = app
                .oneshot(signed_webhook_request(SECRET, &payload))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert!(github.effects().is_empty());
        }
    }

    #[tokio::test]
    async fn payload_without_issue_is_ignored() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let payload = json!({ "zen": "Design for failure.", "hook_id": 7 });
        let response = app
            .oneshot(signed_webhook_request(SECRET, &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ignored");
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn closed_issue_with_nameless_label_is_reopened() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let payload = json!({
            "action": "closed",
            "issue": { "number": 42, "state": "closed", "labels": [{ "name": null }] }
        });
        let response = app
            .oneshot(signed_webhook_request(SECRET, &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "reopened");
        assert_eq!(github.effects().len(), 2);
    }

    #[tokio::test]
    async fn missing_signature_is_rejected_before_decoding() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        // An undecodable body would produce 400 if decoding were attempted.
        let request = Request::builder()
            .method("POST")
            .uri("/github_endpoint")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let request = signed_webhook_request(b"wrong-secret", &issue_payload("closed", &[]));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn duplicated_signature_header_is_rejected() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let mut request = signed_webhook_request(SECRET, &issue_payload("closed", &[]));
        let signature = request.headers()["x-hub-signature"].clone();
        request.headers_mut().append("x-hub-signature", signature);

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn signed_but_malformed_payload_returns_400() {
        let github = RecordingInterpreter::new();
        let app = test_router(github.clone());

        let request = signed_webhook_request(SECRET, &json!({ "issue": { "state": "closed" } }));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn reopen_failure_still_returns_200() {
        let github = RecordingInterpreter::failing_on("post comment");
        let app = test_router(github.clone());

        let request = signed_webhook_request(SECRET, &issue_payload("closed", &[]));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "reopen failed");
        assert_eq!(github.effects().len(), 1);
    }

    #[tokio::test]
    async fn end_to_end_against_mock_github() {
        use wiremock::matchers::{body_json, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/vmware/vic/issues/42/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1001 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/vmware/vic/issues/42"))
            .and(body_json(json!({ "state": "open" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "open" })))
            .expect(1)
            .mount(&server)
            .await;

        let options = ClientOptions {
            base_uri: Some(server.uri()),
            timeout: Duration::from_secs(5),
        };
        let client =
            OctocrabClient::connect("test-token", RepoId::new("vmware", "vic"), &options).unwrap();
        let reopener = IssueReopener::new(client, LabelPolicy::default(), options.timeout);
        let app = build_router(AppState::new(SECRET, reopener));

        let request = signed_webhook_request(SECRET, &issue_payload("closed", &[]));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "reopened");
        // Expectations are verified when `server` drops.
    }
}
