//! GitHub API client and effect interpreter.
//!
//! This module executes [`GitHubEffect`](crate::effects::GitHubEffect)s via the
//! octocrab library, against the single repository the enforcer watches.
//!
//! Requests carry explicit connect and read timeouts. Octocrab's retry layer
//! is switched off, so nothing here retries: a failed call is reported to the
//! caller as a [`GitHubApiError`].

mod client;
mod error;
mod interpreter;

pub use client::{ClientOptions, OctocrabClient};
pub use error::GitHubApiError;
