//! `OpenAI`-compatible chat completions client
//!
//! Talks to any `/chat/completions` endpoint; by default the Hugging Face
//! inference router.

use super::{ChatService, LlmError};
use crate::session::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "moonshotai/Kimi-K2-Instruct";
const TEMPERATURE: f32 = 0.6;

/// Chat completions service
pub struct ChatCompletionsService {
    client: Client,
    api_key: String,
    model: String,
    url: String,
}

impl ChatCompletionsService {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    fn translate_request<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role().as_str(),
                    content: m.content(),
                })
                .collect(),
            temperature: TEMPERATURE,
        }
    }

    fn normalize_response(resp: ChatResponse) -> Result<String, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn parse_error(status: u16, body: &str) -> LlmError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                error: ErrorBody::Detailed { message } | ErrorBody::Plain(message),
            }) => LlmError::from_status(status, &message),
            Err(_) => LlmError::from_status(status, body),
        }
    }
}

#[async_trait]
impl ChatService for ChatCompletionsService {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = self.translate_request(messages);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(parsed)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Providers behind the router report errors either as an object or a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Plain(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::error::LlmErrorKind;

    fn service() -> ChatCompletionsService {
        ChatCompletionsService::new(Client::new(), "token", DEFAULT_MODEL, "https://example.com/v1/")
    }

    #[test]
    fn test_url_joins_base() {
        assert_eq!(service().url, "https://example.com/v1/chat/completions");
    }

    #[test]
    fn test_translate_request_preserves_order_and_roles() {
        let service = service();
        let messages = vec![
            Message::system("be kind"),
            Message::user("hello"),
            Message::assistant("hi!"),
            Message::user("how are you"),
        ];

        let json = serde_json::to_value(service.translate_request(&messages)).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(
            json["messages"],
            serde_json::json!([
                { "role": "system", "content": "be kind" },
                { "role": "user", "content": "hello" },
                { "role": "assistant", "content": "hi!" },
                { "role": "user", "content": "how are you" },
            ])
        );
        assert!((json["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_takes_first_choice() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            ChatCompletionsService::normalize_response(resp).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_normalize_null_content_is_empty() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(ChatCompletionsService::normalize_response(resp).unwrap(), "");
    }

    #[test]
    fn test_normalize_rejects_no_choices() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = ChatCompletionsService::normalize_response(resp).unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Unknown);
    }

    #[test]
    fn test_parse_error_shapes() {
        let detailed = ChatCompletionsService::parse_error(
            401,
            r#"{"error":{"message":"bad token","type":"auth"}}"#,
        );
        assert_eq!(detailed.kind, LlmErrorKind::Auth);
        assert_eq!(detailed.message, "Authentication failed: bad token");

        let plain = ChatCompletionsService::parse_error(503, r#"{"error":"model loading"}"#);
        assert_eq!(plain.kind, LlmErrorKind::ServerError);
        assert_eq!(plain.message, "Server error: model loading");

        let raw = ChatCompletionsService::parse_error(502, "<html>gateway</html>");
        assert_eq!(raw.message, "Server error: <html>gateway</html>");
    }
}
