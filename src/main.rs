// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load an optional .env file and set up logging
// 2. Parse command-line arguments using clap
// 3. Build the GitHub client from the configuration
// 4. Run the conversion and write the document out
// 5. Exit with a proper code:
//    0 = success
//    1 = the input was wrong (bad URL, unknown or empty repository)
//    2 = GitHub or the network failed, or something unexpected happened
//
// Progress lines go to stderr so stdout only ever carries the document.
// =============================================================================

mod cli;
mod config;
mod document;
mod error;
mod github;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;
use document::ConversionResult;
use error::ErrorKind;
use github::GithubClient;

#[tokio::main]
async fn main() {
    // A missing .env file is fine: the token is optional
    dotenvy::dotenv().ok();
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Warnings (truncated trees, skipped files) by default. The emoji progress
// lines already cover the info milestones; RUST_LOG=repo2md=debug shows
// every file as it is fetched.
const DEFAULT_LOG_FILTER: &str = "repo2md=warn";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if config.is_authenticated() {
        eprintln!("🔑 Using GitHub personal access token.");
    } else {
        eprintln!("⚠️  No GitHub token found. Using unauthenticated requests (lower rate limit).");
    }

    let client = GithubClient::new(&config).context("could not set up the GitHub client")?;

    eprintln!("🔍 Converting repository: {}", cli.repo_url);

    let result = match document::convert(&client, &cli.repo_url, config.concurrency).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ [{}] {}", e.kind().status_code(), e);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&e.report())?);
            }
            return Ok(exit_code_for(e.kind()));
        }
    };

    if result.truncated {
        eprintln!("⚠️  File tree for {} is truncated. Some files are missing.", result.repository);
    }

    write_output(&cli, &result)?;

    eprintln!("📊 Summary for {} ({}):", result.repository, result.branch);
    eprintln!("   ✅ Processed: {}", result.processed_count);
    eprintln!("   ⏭️  Skipped: {}", result.skipped_count);

    Ok(0)
}

fn exit_code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::BadInput | ErrorKind::NotFound | ErrorKind::EmptyRepository => 1,
        ErrorKind::ServerError => 2,
    }
}

// Writes either the raw markdown or the JSON summary, to stdout or a file
fn write_output(cli: &Cli, result: &ConversionResult) -> Result<()> {
    let json;
    let rendered: &str = if cli.json {
        json = serde_json::to_string_pretty(result)?;
        &json
    } else {
        &result.document
    };

    match &cli.output {
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            let target = output_path(path, result);
            fs::write(&target, rendered)
                .with_context(|| format!("could not write {}", target.display()))?;
            eprintln!("💾 Wrote {}", target.display());
        }
    }

    Ok(())
}

// An existing directory gets the '<repo>_codebase.md' download name
fn output_path(path: &Path, result: &ConversionResult) -> PathBuf {
    if path.is_dir() {
        path.join(result.file_name())
    } else {
        path.to_path_buf()
    }
}
