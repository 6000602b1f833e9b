//! Text-generation client for model-assisted guidance.
//!
//! [`LlmClient`] is the seam the guidance generator calls through. [`ChatCompletionsClient`]
//! talks to an OpenAI-compatible `/chat/completions` endpoint and asks for a JSON object
//! reply. Every request carries a timeout; timeouts and transport errors surface as request
//! failures and are never retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmSettings;
use crate::error::{CoreError, CoreResult};

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A service that turns a system instruction and a user prompt into JSON text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    fn model(&self) -> &str;

    async fn complete_json(&self, system: &str, prompt: &str) -> CoreResult<String>;
}

/// HTTP client for an OpenAI-compatible chat-completions API.
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsClient {
    /// Build a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::HttpClientBuild` if the underlying HTTP client cannot be created.
    pub fn new(settings: &LlmSettings) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(Duration::from_secs(10).min(settings.timeout()))
            .build()
            .map_err(CoreError::HttpClientBuild)?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url().trim_end_matches('/')
            ),
            api_key: settings.api_key().to_owned(),
            model: settings.model().to_owned(),
            temperature: settings.temperature(),
            timeout_secs: settings.timeout().as_secs(),
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> CoreError {
        if e.is_timeout() {
            CoreError::UpstreamTimeout(self.timeout_secs)
        } else {
            CoreError::UpstreamTransport(e.to_string())
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete_json(&self, system: &str, prompt: &str) -> CoreResult<String> {
        let body = ChatRequest {
            model: &self.model,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "requesting guidance completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::UpstreamTimeout(self.timeout_secs)
            } else {
                CoreError::UpstreamDecode(e.to_string())
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CoreError::MalformedGuidance("reply contained no message content".into()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// What a [`MockLlmClient`] answers with.
    #[derive(Debug, Clone)]
    pub enum MockReply {
        Text(String),
        Timeout(u64),
        Status(u16),
    }

    /// Records every prompt it receives and answers with a fixed reply.
    #[derive(Debug)]
    pub struct MockLlmClient {
        reply: MockReply,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockLlmClient {
        pub fn replying(text: &str) -> Self {
            Self::new(MockReply::Text(text.to_owned()))
        }

        pub fn new(reply: MockReply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// `(system, prompt)` pairs received so far.
        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().expect("mock lock").clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        fn model(&self) -> &str {
            "mock-model"
        }

        async fn complete_json(&self, system: &str, prompt: &str) -> CoreResult<String> {
            self.calls
                .lock()
                .expect("mock lock")
                .push((system.to_owned(), prompt.to_owned()));

            match &self.reply {
                MockReply::Text(text) => Ok(text.clone()),
                MockReply::Timeout(secs) => Err(CoreError::UpstreamTimeout(*secs)),
                MockReply::Status(status) => Err(CoreError::UpstreamStatus {
                    status: *status,
                    body: "upstream error".into(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::llm_settings_from_env_values;

    fn settings(base_url: &str) -> LlmSettings {
        llm_settings_from_env_values(
            Some("sk-test".into()),
            Some(base_url.into()),
            None,
            Some("5".into()),
        )
        .expect("valid settings")
        .expect("credential present")
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let client = ChatCompletionsClient::new(&settings("http://localhost:9999/v1/"))
            .expect("client builds");
        assert_eq!(client.endpoint, "http://localhost:9999/v1/chat/completions");
        assert_eq!(client.model(), "gpt-5");
        assert_eq!(client.timeout_secs, 5);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client =
            ChatCompletionsClient::new(&settings("http://localhost:9999/v1")).expect("client");
        assert!(!format!("{client:?}").contains("sk-test"));
    }

    #[test]
    fn request_body_asks_for_json_object() {
        let body = ChatRequest {
            model: "gpt-5",
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&body).expect("serialise");

        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_failure() {
        // Port 9 (discard) on localhost is not expected to accept HTTP connections.
        let client =
            ChatCompletionsClient::new(&settings("http://127.0.0.1:9/v1")).expect("client");
        let err = client
            .complete_json("sys", "prompt")
            .await
            .expect_err("no server listening");
        assert!(matches!(
            err,
            CoreError::UpstreamTransport(_) | CoreError::UpstreamTimeout(_)
        ));
    }
}
