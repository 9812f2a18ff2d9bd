// src/github/parse.rs
// =============================================================================
// Turns whatever the user pasted into an (owner, repo) pair.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/main/src   (anything after repo is ignored)
//   - git@github.com:owner/repo.git                  (SSH clone address)
//
// The patterns are tried in order, HTTPS first, and the first match wins.
// Nothing here touches the network.
// =============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

// Only anchored at the start: trailing paths are allowed after the repo name
static URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"^https?://(?:www\.)?github\.com/([^/?#]+)/([^/?#]+)")
            .expect("valid https pattern"),
        Regex::new(r"^git@github\.com:([^/]+)/([^/]+)\.git").expect("valid ssh pattern"),
    ]
});

/// A repository on GitHub, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parses a GitHub URL into a [`RepositoryRef`].
///
/// Example:
///   "https://github.com/rust-lang/rust" -> rust-lang / rust
pub fn parse_github_url(url: &str) -> Result<RepositoryRef, ParseError> {
    let input = url.trim();

    for pattern in URL_PATTERNS.iter() {
        let Some(captures) = pattern.captures(input) else {
            continue;
        };

        let owner = captures[1].to_string();
        let name = captures[2]
            .strip_suffix(".git")
            .unwrap_or(&captures[2])
            .to_string();

        // "https://github.com/owner/.git" matches the pattern but names nothing
        if owner.is_empty() || name.is_empty() {
            return Err(ParseError(url.to_string()));
        }

        return Ok(RepositoryRef { owner, name });
    }

    Err(ParseError(url.to_string()))
}
