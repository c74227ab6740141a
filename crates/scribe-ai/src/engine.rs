//! Orchestration of one completion attempt.

use crate::{context, sanitize, ChatClient, CompletionError, PromptBuilder};
use scribe_core::{Document, TextSize};
use scribe_config::ScribeConfig;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs the completion lifecycle: extract context, build the prompt, call
/// the model, sanitize the output.
#[derive(Clone, Debug)]
pub struct CompletionEngine {
    client: ChatClient,
    prompt: PromptBuilder,
    context_limit: usize,
}

impl CompletionEngine {
    pub fn from_config(config: &ScribeConfig) -> Result<Self, CompletionError> {
        Ok(Self {
            client: ChatClient::from_config(&config.provider)?,
            prompt: PromptBuilder::new(
                &config.prompt,
                config.provider.max_tokens,
                config.provider.temperature,
            )?,
            context_limit: config.prompt.context_limit,
        })
    }

    /// One completion attempt at `cursor`.
    ///
    /// Fails with [`CompletionError::EmptyResponse`] when the model produced
    /// nothing usable (zero choices, or a response that sanitizes down to
    /// the empty string); callers treat that like any other inference
    /// failure, meaning no preview is shown.
    pub async fn complete(
        &self,
        doc: &Document,
        cursor: TextSize,
        mode_id: &str,
        cancel: CancellationToken,
    ) -> Result<String, CompletionError> {
        let window = context::extract(doc, cursor, self.context_limit, mode_id);
        let request = self.prompt.build(&window.language, &window.text);

        debug!(
            language = %request.language,
            context_bytes = window.text.len(),
            "requesting completion"
        );

        let raw = self.client.chat(&request, cancel).await?;
        let text = sanitize(&raw);
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        Ok(text)
    }
}
