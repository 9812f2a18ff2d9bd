// src/config.rs
// =============================================================================
// Runtime configuration, built once at startup.
//
// Everything the GitHub client needs to know lives here: where the API is,
// the optional token, how long one request may take, and how many blobs we
// download at the same time. The value is never mutated after it is built;
// the client takes its own copy of what it needs.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::cli::Cli;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the REST API. Relative paths are joined onto it.
    pub api_base: Url,
    /// Personal access token, if any
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum number of blob downloads in flight
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Config {
    /// Builds the configuration from parsed command-line arguments.
    ///
    /// clap has already merged in GITHUB_PAT / GITHUB_API_URL from the
    /// environment, so this only normalises the values.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_base: cli.api_url.clone(),
            token: normalize_token(cli.token.as_deref()),
            timeout: Duration::from_secs(cli.timeout_secs.max(1)),
            concurrency: cli.concurrency.max(1),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

// A blank GITHUB_PAT= line in .env should behave like no token at all
fn normalize_token(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
