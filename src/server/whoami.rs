//! Identification endpoint.

use axum::http::StatusCode;

/// Fixed text served by `GET /whoami`.
pub const WHOAMI_TEXT: &str = "github webhook for enforcing doc labels on PR's\n";

/// Returns the fixed identification text, ignoring the request entirely.
///
/// ```ignore
/// GET /whoami HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: text/plain; charset=utf-8
///
/// github webhook for enforcing doc labels on PR's
/// ```
pub async fn whoami_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, WHOAMI_TEXT)
}
