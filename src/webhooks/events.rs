//! GitHub issue webhook payload types.
//!
//! Only the fields the enforcer acts on are modelled. Everything else in
//! GitHub's payload is ignored, so new upstream fields never break decoding.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::types::IssueNumber;

/// Error type for webhook decoding failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// An `issues` webhook delivery.
///
/// Deliveries for other event types (pings, pushes) decode fine but carry no
/// `issue`, and are ignored by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueEvent {
    /// The action that triggered the delivery ("closed", "labeled", ...).
    #[serde(default)]
    pub action: Option<String>,

    /// The issue the event refers to.
    #[serde(default)]
    pub issue: Option<Issue>,
}

/// The subset of a GitHub issue the enforcer inspects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,

    pub state: IssueState,

    /// Labels in the order GitHub reports them. `null` decodes as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
}

/// GitHub's open/closed status for an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    /// Any state string GitHub may add later.
    #[serde(other)]
    Other,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Label {
    /// A missing or `null` name decodes as empty and matches no policy label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label { name: name.into() }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a webhook payload into an [`IssueEvent`].
///
/// # Examples
///
/// ```
/// use doc_enforcer::webhooks::{IssueState, parse_issue_event};
///
/// let payload = br#"{
///     "action": "closed",
///     "issue": {
///         "number": 42,
///         "state": "closed",
///         "labels": [{ "name": "bug" }]
///     }
/// }"#;
///
/// let event = parse_issue_event(payload).unwrap();
/// let issue = event.issue.unwrap();
/// assert_eq!(issue.state, IssueState::Closed);
/// assert_eq!(issue.labels[0].name, "bug");
/// ```
pub fn parse_issue_event(payload: &[u8]) -> Result<IssueEvent, ParseError> {
    Ok(serde_json::from_slice(payload)?)
}
