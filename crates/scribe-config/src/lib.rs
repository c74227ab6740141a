//! Configuration for Scribe.
//!
//! The configuration is TOML-backed and fully defaulted: an empty file (or no
//! file at all) yields a config that talks to a llama.cpp server on
//! `http://localhost:8080`. Semantic validation is best-effort and collects
//! every problem in one pass so users can fix a config file in one round
//! trip.

mod validation;

pub use validation::ConfigValidationError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Top-level Scribe configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScribeConfig {
    /// Model endpoint configuration (base URL, model name, limits).
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Prompt template configuration.
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl ScribeConfig {
    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading scribe config");
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Validate semantic invariants.
    ///
    /// Validation is best-effort: it reports as many problems as possible in
    /// one pass. An empty result means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        validation::validate(self)
    }
}

impl fmt::Debug for ScribeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScribeConfig")
            .field("provider", &self.provider)
            .field("prompt", &self.prompt)
            .finish()
    }
}

/// Model endpoint settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible chat-completion server.
    ///
    /// Both `http://host:port` and `http://host:port/v1` forms are accepted;
    /// `/v1/chat/completions` is appended as needed.
    #[serde(default = "default_provider_url")]
    pub url: Url,
    /// Model name sent on the wire.
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on generated tokens. Bounds latency and response size.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature. Zero for deterministic completions.
    #[serde(default)]
    pub temperature: f32,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// API key for the endpoint. When absent, the placeholder `no-key`
    /// credential is sent (llama.cpp server accepts anything).
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_provider_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_ms: default_timeout_ms(),
            api_key: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url.as_str())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .field("api_key_present", &self.api_key.is_some())
            .finish()
    }
}

/// Prompt construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// System prompt. Instructs the model to emit code only so the result can
    /// be inserted directly as source.
    #[serde(default = "default_system_prompt")]
    pub system: String,
    /// User prompt template. Must contain `{lang}` exactly twice and
    /// `{context}` exactly once: the language is stated both as an
    /// instruction and as the fence annotation, which models follow more
    /// reliably than either alone.
    #[serde(default = "default_template")]
    pub template: String,
    /// Maximum amount of source text taken before the cursor, in bytes.
    ///
    /// Deliberately bytes, not characters: extraction snaps the window start
    /// forward to a UTF-8 boundary, so the window never splits a character
    /// and never exceeds this limit. Counting characters instead would break
    /// the byte-length bound on the extracted window.
    #[serde(default = "default_context_limit")]
    pub context_limit: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
            template: default_template(),
            context_limit: default_context_limit(),
        }
    }
}

/// Number of times `placeholder` occurs in `template`.
pub fn placeholder_count(template: &str, placeholder: &str) -> usize {
    template.matches(placeholder).count()
}

fn default_provider_url() -> Url {
    Url::parse("http://localhost:8080").expect("default provider url is valid")
}

fn default_model() -> String {
    "LLaMA_CPP".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_context_limit() -> usize {
    700
}

fn default_system_prompt() -> String {
    "You are a code completion engine. Reply with code and nothing else: \
     no comments, no explanations, no test code."
        .to_string()
}

fn default_template() -> String {
    "Generate {lang} code that continues the snippet below. \
     Reply with the continuation only.\n```{lang}\n{context}\n```"
        .to_string()
}

/// Errors while reading or parsing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
