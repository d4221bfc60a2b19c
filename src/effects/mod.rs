//! Effects-as-data for GitHub operations.
//!
//! The reopen flow is planned as a list of [`GitHubEffect`] values and then
//! executed by a [`GitHubInterpreter`]. This keeps the decision logic pure
//! and lets tests run the flow against a recording interpreter.

pub mod github;
pub mod interpreter;

pub use github::{GitHubEffect, GitHubResponse};
pub use interpreter::GitHubInterpreter;
