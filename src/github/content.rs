// src/github/content.rs
// =============================================================================
// Downloads one blob and decides whether it is text we can put in the
// document.
//
// The blob API returns {"encoding": "base64", "content": "aGVs\nbG8="}.
// - encoding isn't base64           -> Skipped(UnsupportedEncoding)
// - base64 decodes to invalid UTF-8 -> Skipped(BinaryOrNonUtf8)
// - request or payload broken       -> Skipped(FetchError)
// - otherwise                       -> Text(content)
//
// The UTF-8 check is the only binary detection we do. fetch_content never
// fails: a bad file costs one section, not the whole conversion.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::warn;

use super::client::HostingApi;
use super::tree::FileEntry;

/// Why a file's content was left out of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BinaryOrNonUtf8,
    UnsupportedEncoding,
    FetchError,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::BinaryOrNonUtf8 => "binary or non-UTF8 content",
            SkipReason::UnsupportedEncoding => "unsupported encoding",
            SkipReason::FetchError => "error fetching content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedContent {
    Text(String),
    Skipped(SkipReason),
}

#[derive(Debug, Deserialize)]
struct BlobResponse {
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: String,
}

/// Fetches and decodes the content of `entry`.
pub async fn fetch_content(api: &dyn HostingApi, entry: &FileEntry) -> FetchedContent {
    let body = match api.get(&entry.content_url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(path = %entry.path, status = ?e.status(), error = %e, "could not fetch file content");
            return FetchedContent::Skipped(SkipReason::FetchError);
        }
    };

    let blob: BlobResponse = match serde_json::from_value(body) {
        Ok(blob) => blob,
        Err(e) => {
            warn!(path = %entry.path, error = %e, "unexpected blob response");
            return FetchedContent::Skipped(SkipReason::FetchError);
        }
    };

    let content = decode_blob(blob.encoding.as_deref(), &blob.content);
    if let FetchedContent::Skipped(reason) = content {
        warn!(path = %entry.path, reason = reason.as_str(), "skipping file");
    }
    content
}

fn decode_blob(encoding: Option<&str>, content: &str) -> FetchedContent {
    if encoding != Some("base64") {
        return FetchedContent::Skipped(SkipReason::UnsupportedEncoding);
    }

    // GitHub wraps the base64 payload at 60 columns
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = match STANDARD.decode(compact) {
        Ok(bytes) => bytes,
        Err(_) => return FetchedContent::Skipped(SkipReason::FetchError),
    };

    match String::from_utf8(bytes) {
        Ok(text) => FetchedContent::Text(text),
        Err(_) => FetchedContent::Skipped(SkipReason::BinaryOrNonUtf8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeApi;
    use serde_json::json;

    const BLOB_URL: &str = "https://api.github.com/repos/o/r/git/blobs/abc";

    fn entry() -> FileEntry {
        FileEntry {
            path: "src/lib.rs".to_string(),
            content_url: BLOB_URL.to_string(),
        }
    }

    #[test]
    fn test_decode_wrapped_base64_text() {
        // "hello\nworld" split across lines the way GitHub sends it
        let decoded = decode_blob(Some("base64"), "aGVsbG8K\nd29ybGQ=\n");
        assert_eq!(decoded, FetchedContent::Text("hello\nworld".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        let payload = STANDARD.encode([0xffu8, 0xfe, 0x00, 0x81]);
        assert_eq!(
            decode_blob(Some("base64"), &payload),
            FetchedContent::Skipped(SkipReason::BinaryOrNonUtf8)
        );
    }

    #[test]
    fn test_other_encodings_are_unsupported() {
        assert_eq!(
            decode_blob(Some("utf-8"), "hello"),
            FetchedContent::Skipped(SkipReason::UnsupportedEncoding)
        );
        assert_eq!(
            decode_blob(None, "hello"),
            FetchedContent::Skipped(SkipReason::UnsupportedEncoding)
        );
    }

    #[test]
    fn test_broken_base64_is_a_fetch_error() {
        assert_eq!(
            decode_blob(Some("base64"), "!!!not base64!!!"),
            FetchedContent::Skipped(SkipReason::FetchError)
        );
    }

    #[tokio::test]
    async fn test_fetch_content_text() {
        let api = FakeApi::new().with_blob(BLOB_URL, "fn main() {}\n");
        assert_eq!(
            fetch_content(&api, &entry()).await,
            FetchedContent::Text("fn main() {}\n".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_error_is_absorbed() {
        let api = FakeApi::new().with_status(BLOB_URL, 403, "API rate limit exceeded");
        assert_eq!(
            fetch_content(&api, &entry()).await,
            FetchedContent::Skipped(SkipReason::FetchError)
        );

        // Nothing registered at all: the fake answers 404
        let api = FakeApi::new();
        assert_eq!(
            fetch_content(&api, &entry()).await,
            FetchedContent::Skipped(SkipReason::FetchError)
        );
    }

    #[tokio::test]
    async fn test_unexpected_blob_shape_is_a_fetch_error() {
        let api = FakeApi::new().with_json(BLOB_URL, json!({ "encoding": "base64", "content": 42 }));
        assert_eq!(
            fetch_content(&api, &entry()).await,
            FetchedContent::Skipped(SkipReason::FetchError)
        );
    }
}
