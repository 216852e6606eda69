//! Message routing
//!
//! Classifies each incoming message, dispatches it to exactly one handler
//! and records the exchange in the shared session. Downstream failures never
//! escape: they come back as warning-prefixed text.

#[cfg(test)]
pub mod testing;

use crate::image_store::ImageStore;
use crate::intent::{classify, Intent, Topic};
use crate::llm::{ChatService, ImageService, LlmError};
use crate::session::{Message, Session};
use crate::wellness::WellnessProvider;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Prefix of every failure reply
pub const WARNING_MARKER: &str = "⚠️";

/// Response sent back for a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Text { bot_response: String },
    Image { image_url: String },
}

impl Reply {
    pub fn text(bot_response: impl Into<String>) -> Self {
        Reply::Text {
            bot_response: bot_response.into(),
        }
    }

    pub fn image(image_url: impl Into<String>) -> Self {
        Reply::Image {
            image_url: image_url.into(),
        }
    }
}

/// Failure text shown to the user, e.g. `⚠️ Chat failed (timeout)`
pub fn failure_text(action: &str, cause: impl Display) -> String {
    format!("{WARNING_MARKER} {action} failed ({cause})")
}

/// Routes messages to image generation, wellness content or chat
pub struct MessageRouter {
    session: Arc<Session>,
    chat: Arc<dyn ChatService>,
    image: Arc<dyn ImageService>,
    store: Arc<dyn ImageStore>,
    wellness: Arc<dyn WellnessProvider>,
    timeout: Duration,
    /// Serializes writers of the single generated-image slot
    image_lock: Mutex<()>,
}

impl MessageRouter {
    pub fn new(
        session: Arc<Session>,
        chat: Arc<dyn ChatService>,
        image: Arc<dyn ImageService>,
        store: Arc<dyn ImageStore>,
        wellness: Arc<dyn WellnessProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            session,
            chat,
            image,
            store,
            wellness,
            timeout,
            image_lock: Mutex::new(()),
        }
    }

    /// Handle one user message. Never fails.
    pub async fn handle(&self, text: &str) -> Reply {
        let intent = classify(text);
        tracing::info!(intent = intent.kind(), input_chars = text.chars().count(), "Routing message");

        match intent {
            Intent::Image { prompt } => self.handle_image(&prompt).await,
            Intent::Wellness(topic) => self.handle_wellness(text, topic).await,
            Intent::GeneralChat => self.handle_chat(text).await,
        }
    }

    /// Start the conversation over
    pub async fn reset(&self) {
        self.session.reset().await;
        tracing::info!("Transcript reset");
    }

    /// Transcript without the system message, for display
    pub async fn visible(&self) -> Vec<Message> {
        self.session.visible().await
    }

    /// Image exchanges are not recorded in the transcript.
    async fn handle_image(&self, prompt: &str) -> Reply {
        let _slot = self.image_lock.lock().await;

        let saved = match self.bounded(self.image.generate(prompt)).await {
            Ok(bytes) => self.store.save(&bytes).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match saved {
            Ok(url) => Reply::image(url),
            Err(cause) => {
                tracing::warn!(error = %cause, "Image request degraded to text");
                Reply::text(failure_text("Image generation", cause))
            }
        }
    }

    async fn handle_wellness(&self, text: &str, topic: Topic) -> Reply {
        let mut transcript = self.session.lock().await;
        let reply = self.wellness.provide(topic);
        transcript.commit_exchange(text, reply.clone());

        tracing::debug!(topic = topic.as_str(), transcript_len = transcript.len(), "Wellness reply");
        Reply::text(reply)
    }

    /// The session lock is held from reading the context until the reply is
    /// recorded, so concurrent chats queue up instead of interleaving.
    async fn handle_chat(&self, text: &str) -> Reply {
        let mut transcript = self.session.lock().await;
        let context = transcript.with_pending(text);

        let reply = match self.bounded(self.chat.complete(&context)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Chat request degraded to text");
                failure_text("Chat", e)
            }
        };

        // Failure text is recorded too, so the history matches what the user saw
        transcript.commit_exchange(text, reply.clone());
        tracing::debug!(transcript_len = transcript.len(), "Chat exchange recorded");
        Reply::text(reply)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, LlmError>>,
    ) -> Result<T, LlmError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| Err(LlmError::timeout(self.timeout)))
    }
}
