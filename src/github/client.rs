//! Octocrab client wrapper scoped to a specific repository.
//!
//! `OctocrabClient` wraps an `Octocrab` instance and scopes all operations to
//! the configured repository, so effects only need to name an issue.

use std::time::Duration;

use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::types::RepoId;

/// Connection settings for [`OctocrabClient::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API root, e.g. a GitHub Enterprise `https://host/api/v3`. Octocrab's
    /// default (`https://api.github.com`) is used when unset.
    pub base_uri: Option<String>,

    /// Applied as both connect and read timeout.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_uri: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// A GitHub API client scoped to a specific repository.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The repository this client is scoped to.
    repo: RepoId,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given repository.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Creates a client authenticated with a personal access token.
    ///
    /// The token is sent as a bearer token on every request. Octocrab's retry
    /// layer is disabled: a retried comment POST would post the reminder twice.
    pub fn connect(
        token: impl Into<String>,
        repo: RepoId,
        options: &ClientOptions,
    ) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder()
            .personal_token(token.into())
            .set_connect_timeout(Some(options.timeout))
            .set_read_timeout(Some(options.timeout))
            .add_retry_config(RetryConfig::None);

        if let Some(base_uri) = &options.base_uri {
            builder = builder.base_uri(base_uri.as_str())?;
        }

        Ok(Self::new(builder.build()?, repo))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
