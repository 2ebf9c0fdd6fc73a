//! Configuration for pitch-deck analysis.
//!
//! All behaviour is controlled through [`AnalysisConfig`], built via its
//! [`AnalysisConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across tasks and to diff two runs.
//!
//! # Design choice: explicit credential, never a global
//! The API credential is a field on the config, injected at construction
//! time and sourced from the environment by [`AnalysisConfig::from_env`].
//! There is deliberately no module-level key and no implicit lookup inside
//! the provider client — a config either carries a credential or the build
//! fails.

use crate::error::AnalysisError;
use std::fmt;

/// Default chat-completions endpoint (Groq's OpenAI-compatible API).
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "compound-beta-mini";

/// Configuration for one or more analysis pipelines.
///
/// Built via [`AnalysisConfig::builder()`] or [`AnalysisConfig::from_env()`].
///
/// # Example
/// ```rust
/// use pitchlens::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .api_key("gsk_example")
///     .model("compound-beta-mini")
///     .temperature(0.7)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Bearer credential for the provider. Required; never logged.
    pub api_key: String,

    /// Chat-completions endpoint URL. Default: [`DEFAULT_API_URL`].
    pub api_url: String,

    /// Model identifier sent in the request body. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Sampling temperature for the evaluation. Range: 0.0–2.0. Default: 0.7.
    ///
    /// The evaluation asks for qualitative judgement, not transcription, so
    /// a moderate temperature is the reference behaviour. Lower it for more
    /// repeatable ratings across runs of the same deck.
    pub temperature: f32,

    /// Deadline for the provider call in seconds. Default: 60.
    ///
    /// The provider call is the only unbounded-latency step in the
    /// pipeline, so it always runs under a deadline. On expiry the caller
    /// gets [`AnalysisError::ApiTimeout`], distinct from a schema failure.
    pub api_timeout_secs: u64,

    /// Custom evaluation instruction template. If `None`, uses the built-in
    /// template from [`crate::prompt`]. The deck content separator and the
    /// rendered sections are always appended after the template — see
    /// [`crate::prompt::build_prompt`].
    pub prompt_override: Option<String>,
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("prompt_override", &self.prompt_override.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Build a config from the environment.
    ///
    /// Reads `PITCHLENS_API_KEY` (falling back to `GROQ_API_KEY`) for the
    /// credential, and honours `PITCHLENS_API_URL` / `PITCHLENS_MODEL`
    /// overrides when set.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("PITCHLENS_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .map_err(|_| {
                AnalysisError::InvalidConfig(
                    "No API key found.\n\
                     Set PITCHLENS_API_KEY (or GROQ_API_KEY) in the environment."
                        .into(),
                )
            })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(url) = std::env::var("PITCHLENS_API_URL") {
            if !url.is_empty() {
                builder = builder.api_url(url);
            }
        }
        if let Ok(model) = std::env::var("PITCHLENS_MODEL") {
            if !model.is_empty() {
                builder = builder.model(model);
            }
        }
        builder.build()
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    api_timeout_secs: u64,
    prompt_override: Option<String>,
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            api_timeout_secs: 60,
            prompt_override: None,
        }
    }
}

impl AnalysisConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.api_timeout_secs = secs.max(1);
        self
    }

    pub fn prompt_override(mut self, template: impl Into<String>) -> Self {
        self.prompt_override = Some(template.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalysisError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "API key must not be empty".into(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AnalysisError::InvalidConfig(format!(
                "API URL must be HTTP(S), got '{}'",
                self.api_url
            )));
        }
        Ok(AnalysisConfig {
            api_key: self.api_key,
            api_url: self.api_url,
            model: self.model,
            temperature: self.temperature,
            api_timeout_secs: self.api_timeout_secs,
            prompt_override: self.prompt_override,
        })
    }
}
