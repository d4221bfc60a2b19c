//! Reopening issues that were closed without a documentation label.
//!
//! A reopen is two remote calls: a reminder comment, then a state change back
//! to open. They run in that order and stop at the first failure. A failed
//! state change leaves the comment in place; nothing is rolled back or retried.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::policy::LabelPolicy;
use crate::types::IssueNumber;

/// Errors from [`IssueReopener::reopen`].
#[derive(Debug, Error)]
pub enum ReopenError<E> {
    /// The interpreter reported a failure.
    #[error("failed to {operation} on issue {issue}: {source}")]
    Effect {
        issue: IssueNumber,
        operation: &'static str,
        #[source]
        source: E,
    },

    /// The call did not finish within the configured timeout.
    #[error("timed out after {timeout:?} trying to {operation} on issue {issue}")]
    TimedOut {
        issue: IssueNumber,
        operation: &'static str,
        timeout: Duration,
    },
}

/// Returns the effects that reopen an issue, in execution order.
pub fn plan_reopen(issue: IssueNumber, policy: &LabelPolicy) -> Vec<GitHubEffect> {
    vec![
        GitHubEffect::PostComment {
            issue,
            body: policy.reminder_comment(),
        },
        GitHubEffect::ReopenIssue { issue },
    ]
}

/// Posts the reminder and reopens issues through a [`GitHubInterpreter`].
#[derive(Debug)]
pub struct IssueReopener<G> {
    github: G,
    policy: LabelPolicy,
    timeout: Duration,
}

impl<G> IssueReopener<G>
where
    G: GitHubInterpreter,
{
    pub fn new(github: G, policy: LabelPolicy, timeout: Duration) -> Self {
        IssueReopener {
            github,
            policy,
            timeout,
        }
    }

    /// Returns the label policy used to render the reminder.
    pub fn policy(&self) -> &LabelPolicy {
        &self.policy
    }

    /// Returns the interpreter effects are executed with.
    pub fn github(&self) -> &G {
        &self.github
    }

    /// Comments on and reopens `issue`.
    ///
    /// Returns the responses of the executed effects. On error, effects after
    /// the failing one are never attempted.
    pub async fn reopen(
        &self,
        issue: IssueNumber,
    ) -> Result<Vec<GitHubResponse>, ReopenError<G::Error>> {
        let mut responses = Vec::with_capacity(2);

        for effect in plan_reopen(issue, &self.policy) {
            let operation = effect.operation();

            let response = match tokio::time::timeout(self.timeout, self.github.interpret(effect))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(source)) => {
                    return Err(ReopenError::Effect {
                        issue,
                        operation,
                        source,
                    });
                }
                Err(_) => {
                    return Err(ReopenError::TimedOut {
                        issue,
                        operation,
                        timeout: self.timeout,
                    });
                }
            };

            debug!(issue = %issue, operation, response = ?response, "GitHub call succeeded");
            responses.push(response);
        }

        info!(issue = %issue, "Reopened issue closed without documentation label");
        Ok(responses)
    }
}
