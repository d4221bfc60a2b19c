//! Process configuration, read once from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `DOC_ENFORCER_SECRET_TOKEN` | required |
//! | `DOC_ENFORCER_GITHUB_ACCESS_TOKEN` | required |
//! | `DOC_ENFORCER_REPO_OWNER` | `vmware` |
//! | `DOC_ENFORCER_REPO_NAME` | `vic` |
//! | `DOC_ENFORCER_HAS_IMPACT_LABEL` | `docs/has-impact` |
//! | `DOC_ENFORCER_NO_IMPACT_LABEL` | `docs/no-impact` |
//! | `DOC_ENFORCER_LISTEN_ADDR` | `0.0.0.0:9399` |
//! | `DOC_ENFORCER_GITHUB_API_URL` | octocrab default |
//! | `DOC_ENFORCER_REQUEST_TIMEOUT_SECS` | `10` |

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::github::ClientOptions;
use crate::policy::{DEFAULT_HAS_IMPACT_LABEL, DEFAULT_NO_IMPACT_LABEL, LabelPolicy};
use crate::types::RepoId;

pub const ENV_SECRET_TOKEN: &str = "DOC_ENFORCER_SECRET_TOKEN";
pub const ENV_GITHUB_ACCESS_TOKEN: &str = "DOC_ENFORCER_GITHUB_ACCESS_TOKEN";
pub const ENV_REPO_OWNER: &str = "DOC_ENFORCER_REPO_OWNER";
pub const ENV_REPO_NAME: &str = "DOC_ENFORCER_REPO_NAME";
pub const ENV_HAS_IMPACT_LABEL: &str = "DOC_ENFORCER_HAS_IMPACT_LABEL";
pub const ENV_NO_IMPACT_LABEL: &str = "DOC_ENFORCER_NO_IMPACT_LABEL";
pub const ENV_LISTEN_ADDR: &str = "DOC_ENFORCER_LISTEN_ADDR";
pub const ENV_GITHUB_API_URL: &str = "DOC_ENFORCER_GITHUB_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "DOC_ENFORCER_REQUEST_TIMEOUT_SECS";

const DEFAULT_REPO_OWNER: &str = "vmware";
const DEFAULT_REPO_NAME: &str = "vic";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9399";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors from loading [`Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable process configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Shared secret for `X-Hub-Signature` validation.
    pub webhook_secret: Vec<u8>,

    /// Token used for outbound GitHub API calls.
    pub github_token: String,

    /// The repository whose issues are enforced.
    pub repo: RepoId,

    pub labels: LabelPolicy,

    pub listen_addr: SocketAddr,

    /// Overrides the GitHub API root (GitHub Enterprise, test servers).
    pub github_api_url: Option<String>,

    /// Upper bound on each outbound GitHub call.
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values are treated as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let webhook_secret = required(ENV_SECRET_TOKEN)?.into_bytes();
        let github_token = required(ENV_GITHUB_ACCESS_TOKEN)?;

        let repo = RepoId::new(
            get(ENV_REPO_OWNER).unwrap_or_else(|| DEFAULT_REPO_OWNER.to_string()),
            get(ENV_REPO_NAME).unwrap_or_else(|| DEFAULT_REPO_NAME.to_string()),
        );

        let labels = LabelPolicy::new(
            get(ENV_HAS_IMPACT_LABEL).unwrap_or_else(|| DEFAULT_HAS_IMPACT_LABEL.to_string()),
            get(ENV_NO_IMPACT_LABEL).unwrap_or_else(|| DEFAULT_NO_IMPACT_LABEL.to_string()),
        );

        let listen_addr = get(ENV_LISTEN_ADDR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: ENV_LISTEN_ADDR,
                value: get(ENV_LISTEN_ADDR).unwrap_or_default(),
                reason: e.to_string(),
            })?;

        let request_timeout = match get(ENV_REQUEST_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_REQUEST_TIMEOUT_SECS,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_REQUEST_TIMEOUT_SECS,
                        reason: e.to_string(),
                        value: raw,
                    });
                }
            },
        };

        Ok(Config {
            webhook_secret,
            github_token,
            repo,
            labels,
            listen_addr,
            github_api_url: get(ENV_GITHUB_API_URL),
            request_timeout,
        })
    }

    /// Connection settings for the GitHub client.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_uri: self.github_api_url.clone(),
            timeout: self.request_timeout,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("webhook_secret", &"<redacted>")
            .field("github_token", &"<redacted>")
            .field("repo", &self.repo)
            .field("labels", &self.labels)
            .field("listen_addr", &self.listen_addr)
            .field("github_api_url", &self.github_api_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
