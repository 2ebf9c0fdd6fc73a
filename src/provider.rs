//! Chat-completions provider client.
//!
//! One POST per evaluation against an OpenAI-compatible chat-completions
//! endpoint (Groq by default). The client owns a `reqwest::Client` with the
//! configured deadline baked in, so every call — connect, send, and body
//! read — counts against the same budget.
//!
//! ## Error mapping
//!
//! - Deadline expiry → [`AnalysisError::ApiTimeout`]. Timeouts are kept
//!   distinct from schema failures so callers can retry one and not the
//!   other.
//! - Non-2xx status → [`AnalysisError::Provider`], with the provider's own
//!   error message when the body carries one.
//! - Malformed completion envelope (no choices, unreadable body) →
//!   [`AnalysisError::Provider`]. Only the *inner* reply content failing
//!   schema validation is a `SchemaViolation`; that happens downstream in
//!   [`crate::response`].
//!
//! The client never retries. Retry policy belongs to the caller, which
//! knows whether a second ~60s wait is acceptable.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── Client ───────────────────────────────────────────────────────────────

/// HTTP client for the evaluation endpoint.
pub struct ProviderClient {
    http: reqwest::Client,
    config: AnalysisConfig,
}

impl ProviderClient {
    /// Build a client with the config's deadline applied to every request.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Internal(format!("building HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Send the evaluation prompt and return the reply content verbatim.
    ///
    /// Returns the inner `choices[0].message.content` string; parsing it
    /// into an [`crate::response::AnalysisResult`] is the caller's step.
    pub async fn evaluate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        info!(
            "Calling provider: model={}, prompt={} chars, timeout={}s",
            self.config.model,
            prompt.len(),
            self.config.api_timeout_secs
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::ApiTimeout {
                        secs: self.config.api_timeout_secs,
                    }
                } else {
                    AnalysisError::Provider {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.map(|detail| detail.message))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(AnalysisError::Provider { message });
        }

        let envelope: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalysisError::ApiTimeout {
                    secs: self.config.api_timeout_secs,
                }
            } else {
                AnalysisError::Provider {
                    message: format!("malformed completion envelope: {e}"),
                }
            }
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::Provider {
                message: "completion envelope contained no choices".into(),
            })?;

        debug!("Provider reply: {} chars", content.len());
        Ok(content)
    }
}
