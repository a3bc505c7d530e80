//! Google Generative AI transport (`models/{model}:generateContent`).
//!
//! # Responsibility
//! - Send one prompt with a JSON response schema per call.
//! - Map API errors, blocked prompts and safety stops to `GatewayError`.
//!
//! # Invariants
//! - The API key is sent only as the `x-goog-api-key` header and never logged.
//! - Requests are blocking and bounded by `GeminiConfig::timeout`.

use super::schema::ResponseSchema;
use super::{GatewayError, GatewayResult, TextGenerator};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Google Generative AI API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the Gemini transport.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model id, e.g. `gemini-3-flash-preview`.
    pub model: String,
    /// API root without trailing slash.
    pub api_base: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Config with default model, base URL and a 60 second timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client; fails when the key is blank or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> GatewayResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn headers(&self) -> GatewayResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(self.config.api_key.trim())
                .map_err(|_| GatewayError::InvalidConfig("invalid API key".to_string()))?,
        );
        Ok(headers)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str, schema: &ResponseSchema) -> GatewayResult<String> {
        let url = self.config.endpoint();
        debug!(
            "event=ai_http module=gateway status=start model={} schema={}",
            self.config.model, schema.name
        );

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&build_request_body(prompt, schema))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|err| {
            GatewayError::ApiResponse {
                status: status.as_u16(),
                message: format!("unreadable response envelope: {err}"),
                error_type: None,
            }
        })?;
        extract_text(parsed)
    }
}

fn build_request_body(prompt: &str, schema: &ResponseSchema) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema.to_wire()
        }
    })
}

fn api_error(status: u16, body: String) -> GatewayError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(envelope) => GatewayError::ApiResponse {
            status: envelope.error.code.unwrap_or(status),
            message: envelope.error.message,
            error_type: envelope.error.status,
        },
        Err(_) => GatewayError::ApiResponse {
            status,
            message: body,
            error_type: None,
        },
    }
}

fn extract_text(response: GenerateResponse) -> GatewayResult<String> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GatewayError::Blocked(format!("prompt blocked: {reason}")));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyResponse)?;
    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(GatewayError::Blocked(
            "response stopped for safety".to_string(),
        ));
    }

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}
