//! GitHub API effect types.
//!
//! Effects are repo-scoped: the interpreter is constructed with a `RepoId`,
//! so effects only name the issue they act on.

use crate::types::{CommentId, IssueNumber};

/// A GitHub API effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEffect {
    /// Post a new comment on an issue.
    PostComment { issue: IssueNumber, body: String },

    /// Set an issue's state to open.
    ReopenIssue { issue: IssueNumber },
}

impl GitHubEffect {
    /// Short operation name, used in logs and errors.
    pub fn operation(&self) -> &'static str {
        match self {
            GitHubEffect::PostComment { .. } => "post comment",
            GitHubEffect::ReopenIssue { .. } => "reopen issue",
        }
    }

    /// The issue this effect acts on.
    pub fn issue(&self) -> IssueNumber {
        match self {
            GitHubEffect::PostComment { issue, .. } | GitHubEffect::ReopenIssue { issue } => *issue,
        }
    }
}

/// Response from executing a [`GitHubEffect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubResponse {
    /// A comment was created.
    CommentPosted { id: CommentId },

    /// The issue was edited.
    IssueUpdated { issue: IssueNumber },
}
