//! Deterministic prompt construction.

use crate::CompletionError;
use scribe_config::{placeholder_count, PromptConfig};

/// One completion attempt's worth of prompt material. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub language: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Builds [`CompletionRequest`]s from a validated template.
///
/// The template names the language twice (once in the instruction, once as
/// the fence annotation) and embeds the context once. Arity is checked at
/// construction time; a malformed template is a configuration mistake, not a
/// per-request condition.
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    system: String,
    template: String,
    max_tokens: u32,
    temperature: f32,
}

impl PromptBuilder {
    pub fn new(
        prompt: &PromptConfig,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self, CompletionError> {
        let lang_count = placeholder_count(&prompt.template, "{lang}");
        if lang_count != 2 {
            return Err(CompletionError::InvalidConfig(format!(
                "prompt.template must contain {{lang}} exactly twice (found {lang_count})"
            )));
        }
        let context_count = placeholder_count(&prompt.template, "{context}");
        if context_count != 1 {
            return Err(CompletionError::InvalidConfig(format!(
                "prompt.template must contain {{context}} exactly once (found {context_count})"
            )));
        }

        Ok(Self {
            system: prompt.system.clone(),
            template: prompt.template.clone(),
            max_tokens,
            temperature,
        })
    }

    /// Assemble the request. Keep the formatting stable: the output feeds
    /// regression tests and determinism relies on it.
    pub fn build(&self, language: &str, context: &str) -> CompletionRequest {
        let user = self
            .template
            .replace("{lang}", language)
            .replace("{context}", context);

        CompletionRequest {
            system: self.system.clone(),
            user,
            language: language.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
