//! API request and response types

use crate::session::Message;
use serde::{Deserialize, Serialize};

/// Chat form submission
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub user_input: String,
}

/// Acknowledgement for actions without a payload
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Visible conversation history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
