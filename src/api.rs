// API client module: a small blocking HTTP client for the Perplexity Sonar
// chat-completions endpoint. One call per question, no retries.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const MODEL: &str = "sonar-pro";
pub const SYSTEM_PROMPT: &str = "Be precise and concise.";
pub const SEARCH_CONTEXT_SIZE: &str = "medium";

/// Failure of a single question. None of these abort the batch.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebSearchOptions {
    pub search_context_size: String,
}

/// Request body sent for every question.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub web_search_options: WebSearchOptions,
}

impl ChatRequest {
    /// The system instruction followed by the question as user content.
    /// Model and search options never depend on the question.
    pub fn for_question(question: &str) -> Self {
        ChatRequest {
            model: MODEL.to_string(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: question.to_string(),
                },
            ],
            web_search_options: WebSearchOptions {
                search_context_size: SEARCH_CONTEXT_SIZE.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    #[serde(default)]
    pub search_context_size: Option<String>,
}

/// Decoded answer. Only `usage.completion_tokens` is used by the runner;
/// the citations are kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created: i64,
    pub usage: Usage,
    #[serde(default)]
    pub citations: Option<serde_json::Value>,
}

/// Anything that can answer one question. Implemented by [`SonarClient`];
/// tests substitute canned answers.
pub trait Answer {
    fn ask(&self, question: &str) -> std::result::Result<ChatResponse, ApiError>;
}

/// Settings needed to build a [`SonarClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
    /// `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

/// Blocking client holding the reqwest client, the endpoint and the
/// authorization headers built once from the API key.
pub struct SonarClient {
    client: Client,
    endpoint: String,
}

impl SonarClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(auth_headers(&config.api_key)?)
            // None lifts reqwest's 30s default
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SonarClient {
            client,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Headers sent with every request. The key is marked sensitive so it
/// never shows up in debug output.
fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .context("API key contains characters not allowed in a header")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

impl Answer for SonarClient {
    fn ask(&self, question: &str) -> std::result::Result<ChatResponse, ApiError> {
        log::debug!("POST {} ({} chars of question)", self.endpoint, question.len());
        let res = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest::for_question(question))
            .send()
            .map_err(ApiError::Network)?;
        let status = res.status();
        let text = res.text().map_err(ApiError::Network)?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
