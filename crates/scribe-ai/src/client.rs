//! HTTP client for OpenAI-compatible chat-completion endpoints.

use crate::{CompletionError, CompletionRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Placeholder credential sent when no API key is configured. llama.cpp
/// server requires the header to be present but does not check the value.
const PLACEHOLDER_API_KEY: &str = "no-key";

#[derive(Clone)]
pub struct ChatClient {
    base_url: Url,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(
        base_url: Url,
        model: impl Into<String>,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Result<Self, CompletionError> {
        let key = api_key.as_deref().unwrap_or(PLACEHOLDER_API_KEY);
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| CompletionError::InvalidConfig(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url,
            model: model.into(),
            timeout,
            client,
        })
    }

    pub fn from_config(config: &scribe_config::ProviderConfig) -> Result<Self, CompletionError> {
        Self::new(
            config.url.clone(),
            config.model.clone(),
            config.timeout(),
            config.api_key.clone(),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, CompletionError> {
        // Accept both:
        // - http://localhost:8080      (we will append /v1/...)
        // - http://localhost:8080/v1   (we will append /...)
        let base_str = self.base_url.as_str().trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{base_str}/"))?;

        let base_path = base.path().trim_end_matches('/');
        if base_path.ends_with("/v1") {
            Ok(base.join(path.trim_start_matches('/'))?)
        } else {
            Ok(base.join(&format!("v1/{}", path.trim_start_matches('/')))?)
        }
    }

    /// Issue one chat-completion request and return the first choice's
    /// message content.
    ///
    /// Zero choices (or a choice without content) is not an error: it is
    /// returned as an empty string and treated downstream as "no completion
    /// produced". No retry is attempted.
    pub async fn chat(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, CompletionError> {
        let url = self.endpoint("/chat/completions")?;
        let body = ChatCompletionWireRequest {
            model: &self.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            messages: vec![
                ChatWireMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatWireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        let fut = async {
            let response = self
                .client
                .post(url)
                .json(&body)
                .timeout(self.timeout)
                .send()
                .await?
                .error_for_status()?;

            let parsed: ChatCompletionWireResponse = response.json().await?;
            let content = match parsed.choices.into_iter().next() {
                // Zero choices: "no completion", not a failure.
                None => String::new(),
                Some(choice) => choice.message.content.ok_or_else(|| {
                    CompletionError::UnexpectedResponse(
                        "missing choices[0].message.content".into(),
                    )
                })?,
            };
            Ok::<_, CompletionError>(content)
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(CompletionError::Cancelled),
            res = fut => res,
        }
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionWireRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatWireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatWireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionWireResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionWireChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionWireChoice {
    message: ChatCompletionWireMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionWireMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ChatClient {
        ChatClient::new(
            Url::parse(base).unwrap(),
            "LLaMA_CPP",
            Duration::from_millis(500),
            None,
        )
        .unwrap()
    }

    #[test]
    fn endpoint_appends_v1_when_missing() {
        let client = client("http://localhost:8080");
        assert_eq!(
            client.endpoint("/chat/completions").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn endpoint_accepts_base_url_with_v1() {
        let client = client("http://localhost:8080/v1");
        assert_eq!(
            client.endpoint("/chat/completions").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = client("http://localhost:8080/v1/");
        assert_eq!(
            client.endpoint("/chat/completions").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn wire_request_shape_matches_protocol() {
        let body = ChatCompletionWireRequest {
            model: "LLaMA_CPP",
            temperature: 0.0,
            max_tokens: 100,
            messages: vec![
                ChatWireMessage {
                    role: "system",
                    content: "sys",
                },
                ChatWireMessage {
                    role: "user",
                    content: "usr",
                },
            ],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "LLaMA_CPP",
                "temperature": 0.0,
                "max_tokens": 100,
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "usr" },
                ],
            })
        );
    }

    #[test]
    fn wire_response_with_no_choices_parses() {
        let parsed: ChatCompletionWireResponse = serde_json::from_str("{\"choices\":[]}").unwrap();
        assert!(parsed.choices.is_empty());

        let parsed: ChatCompletionWireResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
