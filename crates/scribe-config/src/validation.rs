use crate::{placeholder_count, ScribeConfig};

/// Semantic validation failures. These would surface at runtime as broken
/// prompts or requests, so they are reported up front at load time.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// `prompt.template` must name the language exactly twice via `{lang}`.
    TemplateLangArity { found: usize },
    /// `prompt.template` must embed the source text exactly once via `{context}`.
    TemplateContextArity { found: usize },
    MaxTokensZero,
    ContextLimitZero,
    TimeoutZero,
    TemperatureOutOfRange { value: f32 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::TemplateLangArity { found } => write!(
                f,
                "prompt.template must contain {{lang}} exactly twice (found {found})"
            ),
            ConfigValidationError::TemplateContextArity { found } => write!(
                f,
                "prompt.template must contain {{context}} exactly once (found {found})"
            ),
            ConfigValidationError::MaxTokensZero => {
                f.write_str("provider.max_tokens must be >= 1")
            }
            ConfigValidationError::ContextLimitZero => {
                f.write_str("prompt.context_limit must be >= 1")
            }
            ConfigValidationError::TimeoutZero => {
                f.write_str("provider.timeout_ms must be >= 1")
            }
            ConfigValidationError::TemperatureOutOfRange { value } => write!(
                f,
                "provider.temperature must be within [0, 2] (found {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

pub(crate) fn validate(config: &ScribeConfig) -> Vec<ConfigValidationError> {
    let mut out = Vec::new();

    let lang_count = placeholder_count(&config.prompt.template, "{lang}");
    if lang_count != 2 {
        out.push(ConfigValidationError::TemplateLangArity { found: lang_count });
    }
    let context_count = placeholder_count(&config.prompt.template, "{context}");
    if context_count != 1 {
        out.push(ConfigValidationError::TemplateContextArity {
            found: context_count,
        });
    }

    if config.provider.max_tokens == 0 {
        out.push(ConfigValidationError::MaxTokensZero);
    }
    if config.prompt.context_limit == 0 {
        out.push(ConfigValidationError::ContextLimitZero);
    }
    if config.provider.timeout_ms == 0 {
        out.push(ConfigValidationError::TimeoutZero);
    }
    if !(0.0..=2.0).contains(&config.provider.temperature) {
        out.push(ConfigValidationError::TemperatureOutOfRange {
            value: config.provider.temperature,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ScribeConfig::default().validate().is_empty());
    }

    #[test]
    fn validation_collects_all_errors_in_one_pass() {
        let mut config = ScribeConfig::default();
        config.prompt.template = "complete this: {context}".to_string();
        config.provider.max_tokens = 0;
        config.prompt.context_limit = 0;

        let errors = config.validate();
        assert!(errors.contains(&ConfigValidationError::TemplateLangArity { found: 0 }));
        assert!(errors.contains(&ConfigValidationError::MaxTokensZero));
        assert!(errors.contains(&ConfigValidationError::ContextLimitZero));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn template_with_extra_context_placeholder_is_rejected() {
        let mut config = ScribeConfig::default();
        config.prompt.template = "{lang} {lang} {context} {context}".to_string();

        let errors = config.validate();
        assert_eq!(
            errors,
            vec![ConfigValidationError::TemplateContextArity { found: 2 }]
        );
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = ScribeConfig::default();
        config.provider.temperature = -0.5;
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::TemperatureOutOfRange { value: -0.5 }]
        );
    }
}
