//! Core domain types for the documentation label enforcer.

pub mod ids;

pub use ids::{CommentId, IssueNumber, RepoId};
