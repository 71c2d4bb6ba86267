/// Ollama HTTP API client for the SQL generator.
///
/// Talks to a local Ollama instance with the synchronous `ureq` client:
///
/// - **Health check**: is Ollama up with at least one model loaded?
/// - **Chat**: send system + user messages, receive the generated SQL.
///
/// The `/api/chat` endpoint is used so Ollama applies each model's own chat
/// template — no special tokens are hard-coded here.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::schema::GeneratorConfig;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

/// Generation options. Temperature 0.0 keeps the SQL deterministic; the
/// prediction budget is small because a query is a few lines at most.
#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

/// Token budget for a generated query.
const SQL_TOKEN_BUDGET: u32 = 512;

/// Response body from `POST /api/chat` (non-streaming).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Response body from `GET /api/tags` — lists available models.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    #[allow(dead_code)]
    name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous Ollama client, created per invocation from the resolved
/// config. Nothing is cached across calls.
#[derive(Debug)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Build a client from the generator config.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Check whether Ollama is reachable and has at least one model loaded.
    ///
    /// Uses a short 5 s timeout so `nli health` doesn't stall when Ollama is
    /// down. `localhost` is resolved to `127.0.0.1` to dodge IPv6-first DNS
    /// delays on hosts where Ollama only binds IPv4.
    pub fn is_healthy(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url).replace("://localhost", "://127.0.0.1");
        match ureq::get(&url).timeout(Duration::from_secs(5)).call() {
            Ok(resp) => resp
                .into_json::<TagsResponse>()
                .map(|tags| !tags.models.is_empty())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Send chat messages to Ollama and return the assistant's response.
    pub fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url).replace("://localhost", "://127.0.0.1");

        let body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: 0.0,
                num_predict: SQL_TOKEN_BUDGET,
            },
        };

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(&body)
            .context("Ollama chat request failed")?;

        let parsed: ChatResponse = resp
            .into_json()
            .context("failed to parse Ollama chat response")?;

        if parsed.message.content.trim().is_empty() {
            anyhow::bail!("Ollama returned an empty response");
        }

        Ok(parsed.message.content)
    }

    /// Model name for logging and answer metadata.
    pub fn model_name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
