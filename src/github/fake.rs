// src/github/fake.rs
// =============================================================================
// An in-memory HostingApi for tests.
//
// Responses are registered per request target (the exact string the code
// under test passes to `get`). Unknown targets answer 404 like GitHub does.
// A per-target delay lets tests make later files finish before earlier ones,
// and every call is recorded so tests can assert on what was requested.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use super::client::HostingApi;
use crate::error::ApiError;

#[derive(Default)]
pub struct FakeApi {
    responses: HashMap<String, Result<Value, ApiError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, target: &str, body: Value) -> Self {
        self.responses.insert(target.to_string(), Ok(body));
        self
    }

    pub fn with_status(mut self, target: &str, status: u16, message: &str) -> Self {
        self.responses.insert(
            target.to_string(),
            Err(ApiError::Status {
                status,
                message: message.to_string(),
            }),
        );
        self
    }

    pub fn with_transport_error(mut self, target: &str) -> Self {
        self.responses.insert(
            target.to_string(),
            Err(ApiError::Transport("connection refused".to_string())),
        );
        self
    }

    /// Registers a base64 blob the way the Git Data API returns it
    pub fn with_blob(self, target: &str, content: impl AsRef<[u8]>) -> Self {
        let encoded = STANDARD.encode(content);
        self.with_json(target, json!({ "encoding": "base64", "content": encoded }))
    }

    pub fn with_delay(mut self, target: &str, delay: Duration) -> Self {
        self.delays.insert(target.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingApi for FakeApi {
    async fn get(&self, target: &str) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(target.to_string());

        if let Some(delay) = self.delays.get(target) {
            tokio::time::sleep(*delay).await;
        }

        self.responses
            .get(target)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            })
    }
}
