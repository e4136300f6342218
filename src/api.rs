use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RepoChatError, Result};

/// Body of `POST /init-chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitRequest {
    pub repo_url: String,
}

/// Body of `POST /start-chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Acknowledgement returned once the backend has cloned and indexed the repo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAck {
    pub message: String,
    pub local_path: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    local_path: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

// Request validation failures carry a list of `{msg}` items, errors raised by
// the handlers carry a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Items(Vec<ErrorItem>),
}

#[derive(Deserialize)]
struct ErrorItem {
    msg: String,
}

/// The two calls the client makes against the backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask the backend to clone and ingest a repository.
    async fn init_chat(&self, request: &InitRequest) -> Result<InitAck>;

    /// Ask a question about the ingested repository, returning the answer text.
    async fn start_chat(&self, request: &QueryRequest) -> Result<String>;
}

#[derive(Clone)]
pub struct RepoChatClient {
    client: Client,
    base_url: String,
}

impl RepoChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for RepoChatClient {
    async fn init_chat(&self, request: &InitRequest) -> Result<InitAck> {
        let url = self.endpoint("init-chat");
        debug!(%url, repo_url = %request.repo_url, "sending init-chat");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = error_detail(&body).unwrap_or_else(|| status_text(status));
            warn!(status = status.as_u16(), %detail, "init-chat rejected");
            return Err(RepoChatError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: MessageBody = serde_json::from_str(&body)?;
        let message = non_empty(parsed.message).ok_or(RepoChatError::MissingMessage)?;
        info!(%message, local_path = ?parsed.local_path, "repository initialized");

        Ok(InitAck {
            message,
            local_path: parsed.local_path,
        })
    }

    async fn start_chat(&self, request: &QueryRequest) -> Result<String> {
        let url = self.endpoint("start-chat");
        debug!(%url, query_len = request.query.len(), "sending start-chat");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "start-chat rejected");
            return Err(RepoChatError::Server {
                status: status.as_u16(),
                detail: status_text(status),
            });
        }

        let body = response.text().await?;
        let parsed: MessageBody = serde_json::from_str(&body)?;
        non_empty(parsed.message).ok_or(RepoChatError::MissingMessage)
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown Status").to_string()
}

/// Pull the human readable reason out of an error body, if it has one.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        ErrorDetail::Text(text) => Some(text),
        ErrorDetail::Items(items) => items.into_iter().next().map(|item| item.msg),
    }
}
