//! Doc Enforcer - a GitHub webhook receiver that reopens issues closed
//! without a documentation-impact label.
//!
//! This library provides the signature check, label policy, reopen flow and
//! HTTP router used by the `doc-enforcer` binary.

pub mod config;
pub mod effects;
pub mod github;
pub mod policy;
pub mod reopen;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
