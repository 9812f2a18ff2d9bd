// src/error.rs
// =============================================================================
// Error types for the conversion pipeline.
//
// There are three layers of failure:
// - ParseError: the user typed something that isn't a GitHub repo URL
// - ApiError: a single GitHub API call failed (network, HTTP status, bad JSON)
// - ConversionError: the whole conversion had to stop
//
// Per-file problems are NOT errors. They become a skipped section in the
// document (see github::content::SkipReason) and never reach these types.
//
// Each ConversionError has a classification (ErrorKind) so a caller can map
// it to an exit code or an HTTP status:
// - InvalidUrl        -> BadInput        -> 400
// - RepositoryNotFound -> NotFound       -> 404
// - TreeUnavailable   -> ServerError     -> 500
// - EmptyRepository   -> EmptyRepository -> 404
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// The input could not be recognised as a GitHub repository reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid GitHub repository URL format: '{0}'")]
pub struct ParseError(pub String);

/// A single call to the hosting API failed.
///
/// Callers decide whether this is fatal (branch/tree lookups) or just means
/// one file gets skipped (blob lookups).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// DNS, connection refused, TLS, timeout...
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx, but the body wasn't the JSON we expected
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed call, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

/// How a failed conversion should be reported to whoever asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadInput,
    NotFound,
    ServerError,
    EmptyRepository,
}

impl ErrorKind {
    /// The HTTP status an endpoint exposing this pipeline would answer with
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadInput => 400,
            ErrorKind::NotFound | ErrorKind::EmptyRepository => 404,
            ErrorKind::ServerError => 500,
        }
    }
}

/// A failure that stops the whole conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    InvalidUrl(#[from] ParseError),

    #[error(
        "Could not determine default branch for {repository}. \
         Repo might be private, non-existent, or API error occurred. ({source})"
    )]
    RepositoryNotFound {
        repository: String,
        #[source]
        source: ApiError,
    },

    #[error(
        "Could not fetch file list for {repository}. \
         Check permissions or API rate limits. ({source})"
    )]
    TreeUnavailable {
        repository: String,
        #[source]
        source: ApiError,
    },

    #[error("Repository {repository} appears to be empty or no files found.")]
    EmptyRepository { repository: String },
}

/// What `--json` prints when a conversion fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub kind: ErrorKind,
    pub status: u16,
}

impl ConversionError {
    pub fn report(&self) -> ErrorReport {
        let kind = self.kind();
        ErrorReport {
            error: self.to_string(),
            kind,
            status: kind.status_code(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidUrl(_) => ErrorKind::BadInput,
            ConversionError::RepositoryNotFound { .. } => ErrorKind::NotFound,
            ConversionError::TreeUnavailable { .. } => ErrorKind::ServerError,
            ConversionError::EmptyRepository { .. } => ErrorKind::EmptyRepository,
        }
    }
}
