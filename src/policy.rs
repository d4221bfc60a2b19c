//! Documentation-impact label policy.
//!
//! An issue may only stay closed once it carries one of two labels that tell
//! documentation authors whether the change affects them.

use crate::webhooks::{Issue, IssueState, Label};

/// Default label for issues that affect documentation.
pub const DEFAULT_HAS_IMPACT_LABEL: &str = "docs/has-impact";
/// Default label for issues that do not affect documentation.
pub const DEFAULT_NO_IMPACT_LABEL: &str = "docs/no-impact";

/// The pair of labels that satisfy the documentation requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicy {
    pub has_impact: String,
    pub no_impact: String,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        LabelPolicy::new(DEFAULT_HAS_IMPACT_LABEL, DEFAULT_NO_IMPACT_LABEL)
    }
}

impl LabelPolicy {
    pub fn new(has_impact: impl Into<String>, no_impact: impl Into<String>) -> Self {
        LabelPolicy {
            has_impact: has_impact.into(),
            no_impact: no_impact.into(),
        }
    }

    /// Returns true if any label exactly matches one of the two policy labels.
    ///
    /// Matching is case-sensitive.
    pub fn is_satisfied_by(&self, labels: &[Label]) -> bool {
        labels
            .iter()
            .any(|label| label.name == self.has_impact || label.name == self.no_impact)
    }

    /// Returns true if the issue was closed without a documentation label.
    pub fn requires_reopen(&self, issue: &Issue) -> bool {
        issue.state == IssueState::Closed && !self.is_satisfied_by(&issue.labels)
    }

    /// The reminder posted on issues that get reopened.
    pub fn reminder_comment(&self) -> String {
        format!(
            "Please help keep our documentation up to date by adding either `{}` or `{}` \
             as a label to this issue to notify our documentation authors as to whether \
             or not this issue affects the documentation.",
            self.no_impact, self.has_impact
        )
    }
}
