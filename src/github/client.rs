// src/github/client.rs
// =============================================================================
// A thin wrapper around reqwest for the three GitHub calls we make:
// - GET /repos/{owner}/{repo}                              (metadata)
// - GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1 (file tree)
// - GET <blob url from the tree listing>                   (file content)
//
// Every request carries the same headers (Accept, User-Agent and, when we
// have a token, Authorization). Each call is a single attempt: no retries.
// Anything that isn't a 2xx response with a JSON body becomes an ApiError
// and the caller decides how bad that is.
//
// The pipeline talks to the HostingApi trait rather than to GithubClient
// directly, which is what lets the tests swap in a canned fake.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Read-only access to a GitHub-shaped REST API.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// GETs `target` and returns the JSON body.
    ///
    /// `target` is either a path relative to the API root
    /// ("repos/o/r") or an absolute URL taken from an earlier response.
    async fn get(&self, target: &str) -> Result<Value, ApiError>;
}

/// The real client, backed by reqwest.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: Url,
}

impl GithubClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .default_headers(default_headers(config.token.as_deref())?)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
        })
    }
}

#[async_trait]
impl HostingApi for GithubClient {
    async fn get(&self, target: &str) -> Result<Value, ApiError> {
        let url = endpoint(&self.api_base, target)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The body is only used to build a better message
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        // A timeout or reset while reading the body is still a transport failure
        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })
    }
}

// Builds the headers sent with every request
fn default_headers(token: Option<&str>) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
    // GitHub rejects requests without a User-Agent
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

// Resolves a request target against the API root.
//
// Url::join drops the last path segment of a base without a trailing slash
// ("https://host/api/v3" + "repos" = "https://host/api/repos"), so make sure
// there is one before joining.
fn endpoint(api_base: &Url, target: &str) -> Result<Url, ApiError> {
    if target.starts_with("https://") || target.starts_with("http://") {
        return Url::parse(target).map_err(|e| ApiError::Transport(format!("invalid URL '{}': {}", target, e)));
    }

    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(target.trim_start_matches('/'))
        .map_err(|e| ApiError::Transport(format!("invalid API path '{}': {}", target, e)))
}

// GitHub error bodies look like {"message": "Not Found", "documentation_url": ...}
fn error_message(body: &str, reason: Option<&str>) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => reason.unwrap_or("unknown error").to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for a single client?
//    - Tests need GitHub answers without a network connection
//    - Code that takes `&dyn HostingApi` works with GithubClient in main.rs
//      and with an in-memory fake in the tests
//
// 2. What does #[async_trait] do?
//    - It rewrites `async fn` in the trait into a method returning a boxed
//      future, which is what makes `&dyn HostingApi` possible
//
// 3. Why set_sensitive on the token header?
//    - reqwest/hyper then leave its value out of Debug output, so the token
//      never ends up in logs
// -----------------------------------------------------------------------------
