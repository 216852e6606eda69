//! Hosted model clients
//!
//! Chat completion and text-to-image generation behind small traits, so the
//! router can be exercised with mocks.

mod error;
pub mod inference;
pub mod openai;

pub use error::LlmError;
pub use inference::TextToImageService;
pub use openai::ChatCompletionsService;

use crate::session::Message;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Chat completion over an ordered transcript
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Generate the assistant reply for the given messages
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Text-to-image generation
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Generate an image, returning the encoded bytes
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for chat services
pub struct LoggingChat {
    inner: Arc<dyn ChatService>,
    model_id: String,
}

impl LoggingChat {
    pub fn new(inner: Arc<dyn ChatService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ChatService for LoggingChat {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let start = Instant::now();
        let result = self.inner.complete(messages).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    context_messages = messages.len(),
                    reply_chars = reply.chars().count(),
                    "Chat completion succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Chat completion failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Logging wrapper for image services
pub struct LoggingImage {
    inner: Arc<dyn ImageService>,
    model_id: String,
}

impl LoggingImage {
    pub fn new(inner: Arc<dyn ImageService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ImageService for LoggingImage {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, LlmError> {
        let start = Instant::now();
        let result = self.inner.generate(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(bytes) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    bytes = bytes.len(),
                    "Image generation succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Image generation failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
