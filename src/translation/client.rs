use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::ProviderOptions;
use crate::error::{Result, TranslateError};

const TEMPERATURE: f64 = 0.2;
const TOP_P: f64 = 1.0;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

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

/// One conversation to complete.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Quota report of a completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub count: u64,
    pub limit: u64,
}

impl Usage {
    /// Fixed report returned while no real usage endpoint is wired in.
    pub const PLACEHOLDER: Self = Self {
        count: 1,
        limit: 10,
    };
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one conversation and returns the raw content of the reply.
    async fn translate(&self, request: CompletionRequest) -> Result<String>;

    async fn usage(&self) -> Result<Usage>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    response_format: ResponseFormat,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
///
/// The HTTP client is built on first use and reused afterwards.
pub struct OpenAiClient {
    http: OnceLock<Client>,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(options: &ProviderOptions) -> Self {
        Self {
            http: OnceLock::new(),
            base_url: options.base_url.clone(),
            api_key: options.api_key.clone(),
            model: options.model.clone(),
            timeout: options.request_timeout,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn http(&self) -> Result<&Client> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TranslateError::Unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(self.http.get_or_init(|| client))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn translate(&self, request: CompletionRequest) -> Result<String> {
        let url = self.endpoint();

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let response = self
            .http()?
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslateError::Unknown(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Unknown(format!("failed to decode response: {e}")))?;

        first_content(completion).ok_or_else(TranslateError::no_result)
    }

    async fn usage(&self) -> Result<Usage> {
        Ok(Usage::PLACEHOLDER)
    }
}

fn map_status(status: StatusCode, body: &str) -> TranslateError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TranslateError::rate_limited(),
        StatusCode::BAD_REQUEST => TranslateError::bad_request(),
        _ => {
            let detail = serde_json::json!({
                "status": status.as_u16(),
                "body": body,
            });
            TranslateError::Unknown(detail.to_string())
        }
    }
}

fn first_content(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            TranslateError::RateLimited(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, "bad"),
            TranslateError::BadRequest(_)
        ));

        let err = map_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let TranslateError::Unknown(detail) = err else {
            panic!("expected unknown error");
        };
        let detail: serde_json::Value = serde_json::from_str(&detail).unwrap();
        assert_eq!(detail["status"], 500);
        assert_eq!(detail["body"], "boom");
    }

    #[test]
    fn test_first_content_takes_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"one"}},{"message":{"content":"two"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(response), Some("one".to_string()));
    }

    #[test]
    fn test_first_content_empty_choices() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(first_content(response), None);

        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_content(response), None);
    }

    #[test]
    fn test_first_content_null_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(first_content(response), None);
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("usr")];
        let body = ChatCompletionRequest {
            model: "gpt-4",
            messages: &messages,
            max_tokens: 128,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["max_tokens"], 128);
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "usr");
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["frequency_penalty"], 0.0);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut options = ProviderOptions::for_tests();
        options.base_url = "http://localhost:8080/v1/".to_string();
        let client = OpenAiClient::new(&options);
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_usage_is_placeholder() {
        let client = OpenAiClient::new(&ProviderOptions::for_tests());
        assert_eq!(client.usage().await.unwrap(), Usage::PLACEHOLDER);
    }
}
