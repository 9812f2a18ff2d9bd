// src/github/mod.rs
// =============================================================================
// Everything that talks to (or reasons about) GitHub.
//
// - parse:   repository URL -> RepositoryRef, no network
// - client:  the HostingApi trait and its reqwest implementation
// - branch:  default branch lookup
// - tree:    recursive file listing for a branch
// - content: one blob -> text, or a reason to skip it
//
// The document module only uses the re-exports below.
// =============================================================================

mod branch;
mod client;
mod content;
mod parse;
mod tree;

#[cfg(test)]
pub(crate) mod fake;

pub use branch::resolve_default_branch;
pub use client::{GithubClient, HostingApi};
pub use content::{fetch_content, FetchedContent, SkipReason};
pub use parse::{parse_github_url, RepositoryRef};
pub use tree::list_files;
