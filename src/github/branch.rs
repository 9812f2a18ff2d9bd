// src/github/branch.rs
// Looks up which branch GitHub considers the repository's default.

use serde::Deserialize;
use tracing::debug;

use super::client::HostingApi;
use super::parse::RepositoryRef;
use crate::error::ApiError;

/// Used when the metadata call succeeds but carries no usable branch name.
pub const FALLBACK_BRANCH: &str = "main";

#[derive(Debug, Deserialize)]
struct RepositoryMetadata {
    #[serde(default)]
    default_branch: Option<String>,
}

/// Resolves the default branch of `repo`.
///
/// API errors are returned as-is; the caller turns them into "not found".
pub async fn resolve_default_branch(
    api: &dyn HostingApi,
    repo: &RepositoryRef,
) -> Result<String, ApiError> {
    let body = api.get(&format!("repos/{}/{}", repo.owner, repo.name)).await?;

    let metadata: RepositoryMetadata =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    let branch = metadata
        .default_branch
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| {
            debug!(repository = %repo, "no default_branch in metadata, using '{}'", FALLBACK_BRANCH);
            FALLBACK_BRANCH.to_string()
        });

    Ok(branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeApi;
    use serde_json::json;

    fn repo() -> RepositoryRef {
        RepositoryRef {
            owner: "o".to_string(),
            name: "r".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolves_declared_branch() {
        let api = FakeApi::new().with_json("repos/o/r", json!({ "default_branch": "develop" }));
        assert_eq!(resolve_default_branch(&api, &repo()).await.unwrap(), "develop");
        assert_eq!(api.calls(), vec!["repos/o/r".to_string()]);
    }

    #[tokio::test]
    async fn test_falls_back_to_main_when_missing_or_empty() {
        let api = FakeApi::new().with_json("repos/o/r", json!({ "name": "r" }));
        assert_eq!(resolve_default_branch(&api, &repo()).await.unwrap(), "main");

        let api = FakeApi::new().with_json("repos/o/r", json!({ "default_branch": "" }));
        assert_eq!(resolve_default_branch(&api, &repo()).await.unwrap(), "main");

        let api = FakeApi::new().with_json("repos/o/r", json!({ "default_branch": null }));
        assert_eq!(resolve_default_branch(&api, &repo()).await.unwrap(), "main");
    }

    #[tokio::test]
    async fn test_api_error_is_not_masked_by_fallback() {
        let api = FakeApi::new().with_status("repos/o/r", 404, "Not Found");
        let err = resolve_default_branch(&api, &repo()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_non_object_body_is_a_decode_error() {
        let api = FakeApi::new().with_json("repos/o/r", json!(["not", "an", "object"]));
        let err = resolve_default_branch(&api, &repo()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
