//! Webhook handling for GitHub issue events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA1)
//! - Decoding of issue event payloads

pub mod events;
pub mod signature;

pub use events::{Issue, IssueEvent, IssueState, Label, ParseError, parse_issue_event};
pub use signature::{
    SIGNATURE_HEADER, compute_signature, format_signature_header, validate_signature,
    verify_signature,
};
