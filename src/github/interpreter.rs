//! GitHub effect interpreter using octocrab.
//!
//! Both effects go through octocrab's raw `post`/`patch` helpers, so only the
//! comment `id` needs to be present in a response.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::{CommentId, IssueNumber};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        interpret_github_effect(self, effect).await
    }
}

/// Executes a single effect against the GitHub API.
async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    debug!(repo = %client.repo(), effect = ?effect, "Executing GitHub effect");

    match effect {
        GitHubEffect::PostComment { issue, body } => post_comment(client, issue, body).await,
        GitHubEffect::ReopenIssue { issue } => reopen_issue(client, issue).await,
    }
}

fn issue_route(client: &OctocrabClient, issue: IssueNumber) -> String {
    format!(
        "/repos/{}/{}/issues/{}",
        client.owner(),
        client.repo_name(),
        issue.0
    )
}

async fn post_comment(
    client: &OctocrabClient,
    issue: IssueNumber,
    body: String,
) -> Result<GitHubResponse, GitHubApiError> {
    #[derive(Serialize)]
    struct CreateCommentRequest {
        body: String,
    }

    #[derive(Deserialize)]
    struct CreatedComment {
        id: u64,
    }

    let url = format!("{}/comments", issue_route(client, issue));
    let result: Result<CreatedComment, _> = client
        .inner()
        .post(&url, Some(&CreateCommentRequest { body }))
        .await;

    match result {
        Ok(comment) => Ok(GitHubResponse::CommentPosted {
            id: CommentId(comment.id),
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn reopen_issue(
    client: &OctocrabClient,
    issue: IssueNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    #[derive(Serialize)]
    struct EditIssueRequest {
        state: &'static str,
    }

    let url = issue_route(client, issue);
    let result: Result<serde_json::Value, _> = client
        .inner()
        .patch(&url, Some(&EditIssueRequest { state: "open" }))
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::IssueUpdated { issue }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}
