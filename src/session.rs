//! Conversation transcript shared by every request
//!
//! The transcript always starts with the companion's system instruction and
//! grows only in user/assistant pairs, so it can be replayed to the chat
//! model as-is.

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

/// Instruction that seeds every transcript
pub const SYSTEM_PROMPT: &str = "You are 'Sakhi', a warm, compassionate companion who is both a friend and a supportive counselor. \
Listen actively and validate the user's feelings. Offer gentle guidance, encouragement, and small coping suggestions, \
like breathing exercises, mindfulness tips, journaling, or comforting words. \
Keep responses empathetic, friendly, and human-like, never mechanical or overly long. \
Do not give medical advice or diagnosis. \
Respond in the same language the user uses, or the dominant language if mixed. \
Your tone should feel like someone who genuinely cares and is right there with them.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
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

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered message log, seeded with the system message
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::system(SYSTEM_PROMPT)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Messages shown to the user (everything but the system message)
    pub fn visible(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect()
    }

    /// Full chat context for a user message that has not been committed yet
    pub fn with_pending(&self, user_text: &str) -> Vec<Message> {
        let mut context = Vec::with_capacity(self.messages.len() + 1);
        context.extend_from_slice(&self.messages);
        context.push(Message::user(user_text));
        context
    }

    /// Append one user message and the assistant reply that answered it.
    ///
    /// This is the only way to grow the transcript, which keeps roles
    /// alternating after the system message.
    pub fn commit_exchange(&mut self, user_text: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::assistant(reply));
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide conversation session
///
/// Owns the transcript behind an async mutex. Holders of the guard have
/// exclusive access for as long as they keep it, including across awaits.
#[derive(Debug, Default)]
pub struct Session {
    transcript: Mutex<Transcript>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            transcript: Mutex::new(Transcript::new()),
        }
    }

    /// Exclusive access to the transcript
    pub async fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().await
    }

    /// Discard the history, leaving only the system message
    pub async fn reset(&self) {
        *self.transcript.lock().await = Transcript::new();
    }

    pub async fn visible(&self) -> Vec<Message> {
        self.transcript.lock().await.visible()
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Message> {
        self.transcript.lock().await.messages().to_vec()
    }
}
