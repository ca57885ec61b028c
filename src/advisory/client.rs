//! Inference service client.
//!
//! # Responsibilities
//! - Send chat-style prompts to an OpenAI-compatible endpoint
//! - Request JSON-object structured output
//! - Hand the model's answer back as an opaque JSON value
//!
//! # Design Decisions
//! - No retries and no timeout beyond the transport defaults
//! - Non-2xx responses are errors; the body is kept for the error message
//! - Content that is not valid JSON is returned as a JSON string

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while calling the inference service.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// Transport-level failure.
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried no usable completion.
    #[error("inference response had no content")]
    EmptyResponse,
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-style inference service returning structured JSON.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run the prompt in JSON-object mode and return the model's answer.
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<Value, AdvisoryError>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`.
#[derive(Clone)]
pub struct HttpInferenceClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpInferenceClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<Value, AdvisoryError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AdvisoryError::EmptyResponse)?;

        tracing::debug!(model = %self.model, bytes = content.len(), "Inference completed");

        Ok(serde_json::from_str(&content).unwrap_or(Value::String(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = reqwest::Client::new();
        let a = HttpInferenceClient::new(client.clone(), "http://localhost:11434/v1/", "m", None);
        let b = HttpInferenceClient::new(client, "http://localhost:11434/v1", "m", None);
        assert_eq!(a.endpoint(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(a.endpoint(), b.endpoint());
    }

    #[test]
    fn test_request_body_shape() {
        let messages = [ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ChatCompletionRequest {
            model: "llama",
            messages: &messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "llama",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "response_format": {"type": "json_object"}
            })
        );
    }
}
