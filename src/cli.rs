// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single operation, "convert this repository", so instead of
// subcommands the Cli struct takes the repository URL as a positional
// argument plus a few flags that tune output and networking.
//
// Flags that carry secrets or deployment details (token, API URL) can also
// come from the environment thanks to clap's `env` feature. main.rs loads a
// .env file before parsing, so GITHUB_PAT=... in .env works too.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::config::{DEFAULT_API_BASE, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "repo2md",
    version,
    about = "Convert a GitHub repository into a single markdown document",
    long_about = "repo2md walks the default branch of a GitHub repository through the REST API \
                  and concatenates every text file into one markdown document, one section per \
                  file. Binary and non-UTF8 files are listed but their content is skipped."
)]
pub struct Cli {
    /// GitHub repository URL
    ///
    /// Accepts https://github.com/owner/repo[/...] and git@github.com:owner/repo.git
    pub repo_url: String,

    /// Write the document to this file instead of stdout
    ///
    /// If the path is an existing directory, '<repo>_codebase.md' is created inside it
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a JSON object (counts, branch, document) instead of raw markdown
    #[arg(long)]
    pub json: bool,

    /// Maximum number of file downloads running at the same time
    ///
    /// 1 fetches files strictly one after another
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for each GitHub API request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// GitHub personal access token (raises the API rate limit)
    #[arg(long, env = "GITHUB_PAT", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: Url,
}
