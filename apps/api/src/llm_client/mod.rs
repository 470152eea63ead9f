//! LLM Client — the single point of entry for all model calls in Qualify.
//!
//! ARCHITECTURAL RULE: no other module may call the completion API directly.
//! The pipeline depends on the `CompletionClient` trait so tests can swap in
//! stubs without touching orchestration code.
//!
//! Model: gpt-3.5-turbo (hardcoded — do not make configurable to prevent drift)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AnalysisError;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all qualification analyses.
pub const MODEL: &str = "gpt-3.5-turbo";
/// Lowest-randomness decoding, fixed for reproducible response structure.
const TEMPERATURE: f32 = 0.0;

/// A fully built model request: fixed system instruction plus the labeled
/// resume/job user content. Immutable once built by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub system: &'static str,
    pub user_content: String,
}

/// One-shot completion interface. A single request/response pair: no
/// streaming, no multi-turn state, and no automatic retry — a transient
/// failure surfaces directly as `ModelCall` and retry policy is left to
/// callers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the first completion's text content verbatim.
    async fn complete(&self, request: &ModelRequest) -> Result<String, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Production `CompletionClient` over the OpenAI chat-completions API.
///
/// Holds the API key as explicit constructor state rather than reading the
/// process environment at call time; a missing key fails each call with
/// `Configuration` before any network traffic.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &ModelRequest) -> Result<String, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnalysisError::Configuration(
                "OPENAI_API_KEY is not set. Please add it to the environment".to_string(),
            )
        })?;

        let body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_content,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::ModelCall(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the service's own error message when the body parses
            let message = serde_json::from_str::<OpenAiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AnalysisError::ModelCall(format!(
                "API returned {status}: {message}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ModelCall(format!("invalid response body: {e}")))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                AnalysisError::ModelCall("completion contained no message content".to_string())
            })?;

        debug!("model call succeeded: {} reply bytes", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let client = OpenAiClient::new(None);
        let request = ModelRequest {
            system: "system",
            user_content: "user".to_string(),
        };

        let err = client.complete(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }

    #[test]
    fn test_chat_request_serializes_system_then_user() {
        let body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "instruction",
                },
                ChatMessage {
                    role: "user",
                    content: "resume + job",
                },
            ],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_chat_response_first_choice_content() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "{\"ok\": true}"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "{\"ok\": true}");
    }
}
