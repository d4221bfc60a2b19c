//! Effect interpreter trait.
//!
//! The production implementation is the octocrab-backed
//! [`OctocrabClient`](crate::github::OctocrabClient). Tests substitute a
//! recording interpreter.

use std::future::Future;

use super::github::{GitHubEffect, GitHubResponse};

/// Interprets GitHub effects against the GitHub API.
///
/// Implementations are constructed with a `RepoId`, so all effects executed
/// through a single interpreter instance are scoped to that repository.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct RecordingInterpreter {
///     seen: Mutex<Vec<GitHubEffect>>,
/// }
///
/// impl GitHubInterpreter for RecordingInterpreter {
///     type Error = std::io::Error;
///
///     async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
///         let issue = effect.issue();
///         self.seen.lock().unwrap().push(effect);
///         Ok(GitHubResponse::IssueUpdated { issue })
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// The error type returned by this interpreter.
    type Error;

    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send;
}
