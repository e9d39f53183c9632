//! OpenAI-compatible chat completions adapter.
//!
//! Works with Groq, OpenAI, DeepSeek and any provider exposing
//! `/v1/chat/completions`. Uses browser `fetch()` via gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{Value, json};

use trip_core::ports::*;
use trip_types::{Result, TripError, config::LlmConfig};

pub struct OpenAiCompatProvider {
    config: LlmConfig,
    base_url: String,
}

impl OpenAiCompatProvider {
    /// Fails with `Config` when no API key is set.
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TripError::Config(format!(
                "{} API key is not configured",
                config.provider.label()
            )));
        }
        let base_url = config.base_url().trim_end_matches('/').to_string();
        Ok(Self { config, base_url })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait(?Send)]
impl LlmPort for OpenAiCompatProvider {
    async fn complete(&self, req: ChatRequest) -> Result<ChatResponse> {
        let body = request_body(&req);
        log::debug!("POST {} (model {})", self.endpoint(), req.model);

        let response = Request::post(&self.endpoint())
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| TripError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TripError::Model(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TripError::Network(e.to_string()))?;
        parse_completion(&text)
    }
}

// ─── Wire format ─────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

pub fn request_body(req: &ChatRequest) -> Value {
    let messages: Vec<Value> = req
        .messages
        .iter()
        .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
        .collect();

    json!({
        "model": req.model,
        "messages": messages,
        "max_tokens": req.max_tokens,
        "temperature": req.temperature,
    })
}

/// Decode a chat completions body into the first choice's text.
pub fn parse_completion(body: &str) -> Result<ChatResponse> {
    let data: ApiResponse =
        serde_json::from_str(body).map_err(|e| TripError::Model(format!("malformed completion: {}", e)))?;

    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TripError::Model("No choices in response".to_string()))?;

    let usage = data.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });
    if let Some(u) = &usage {
        log::debug!("Token usage: {} prompt, {} completion", u.prompt_tokens, u.completion_tokens);
    }

    Ok(ChatResponse {
        content: choice.message.content.unwrap_or_default(),
        usage,
    })
}
