// src/document/convert.rs
// =============================================================================
// The conversion pipeline:
//
// 1. Parse the URL                  (fails -> bad input)
// 2. Resolve the default branch     (fails -> not found)
// 3. List the files on that branch  (fails -> server error, empty -> empty repo)
// 4. Fetch every file               (per-file failures only skip that file)
// 5. Render the document and count processed / skipped files
//
// Step 4 runs up to `concurrency` downloads at once. We use `buffered`
// rather than `buffer_unordered`: results come back in the order the
// futures were created, which is the tree-listing order, no matter which
// download finishes first. Sections in the document therefore always match
// the listing.
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info};

use super::render::{render_document, DocumentSection};
use crate::error::ConversionError;
use crate::github::{self, HostingApi, RepositoryRef};

/// Everything a successful conversion produces.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub repository: RepositoryRef,
    pub branch: String,
    /// True when GitHub cut the file listing short; the document only covers
    /// the files it did return
    pub truncated: bool,
    pub processed_count: usize,
    pub skipped_count: usize,
    pub document: String,
}

impl ConversionResult {
    /// File name the original web front-end offered for download
    pub fn file_name(&self) -> String {
        format!("{}_codebase.md", self.repository.name)
    }
}

/// Converts the repository behind `url` into a markdown document.
pub async fn convert(
    api: &dyn HostingApi,
    url: &str,
    concurrency: usize,
) -> Result<ConversionResult, ConversionError> {
    let repo = github::parse_github_url(url)?;
    info!(repository = %repo, "processing repository");

    let branch = github::resolve_default_branch(api, &repo)
        .await
        .map_err(|source| ConversionError::RepositoryNotFound {
            repository: repo.to_string(),
            source,
        })?;
    info!(%branch, "using default branch");

    let listing = github::list_files(api, &repo, &branch)
        .await
        .map_err(|source| ConversionError::TreeUnavailable {
            repository: repo.to_string(),
            source,
        })?;

    if listing.entries.is_empty() {
        return Err(ConversionError::EmptyRepository {
            repository: repo.to_string(),
        });
    }
    info!(files = listing.entries.len(), "found files to process");

    let sections: Vec<DocumentSection> = stream::iter(listing.entries.iter().map(|entry| async move {
        debug!(path = %entry.path, "processing file");
        let content = github::fetch_content(api, entry).await;
        DocumentSection::new(entry.path.clone(), content)
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let skipped_count = sections.iter().filter(|s| s.is_skipped()).count();
    let processed_count = sections.len() - skipped_count;
    let document = render_document(&repo, &sections);

    info!(processed = processed_count, skipped = skipped_count, "conversion complete");

    Ok(ConversionResult {
        repository: repo,
        branch,
        truncated: listing.truncated,
        processed_count,
        skipped_count,
        document,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffer_unordered yields results as they finish
//    - buffered yields them in the order they went in, holding back fast
//      results until the slower ones before them are done
//    - We need the document to follow the tree listing, so: buffered
//
// 2. Why `async move` inside the map?
//    - Each file gets its own future that owns copies of `entry` and `api`
//    - Both are references, so "moving" them just copies a pointer
//
// 3. Why is EmptyRepository an error and not an empty document?
//    - A title with nothing under it looks like success but isn't useful
//    - Returning an error lets the caller tell the user what happened
// -----------------------------------------------------------------------------
