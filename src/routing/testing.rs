//! Mock collaborators for router tests
//!
//! Queued responses plus a record of every call, so tests can assert on
//! exactly what the router sent downstream.

use crate::image_store::{ImageStore, ImageStoreError};
use crate::intent::Topic;
use crate::llm::{ChatService, ImageService, LlmError};
use crate::session::Message;
use crate::wellness::WellnessProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Chat Service
// ============================================================================

/// Chat service that returns queued replies
pub struct MockChat {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    delay: Option<Duration>,
    /// Every transcript the router asked to complete
    pub requests: Mutex<Vec<Vec<Message>>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering (for timeout and interleaving tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for MockChat {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &'static str {
        "mock-chat"
    }
}

// ============================================================================
// Mock Image Service
// ============================================================================

/// Image service that returns queued images
pub struct MockImage {
    responses: Mutex<VecDeque<Result<Vec<u8>, LlmError>>>,
    delay: Option<Duration>,
    /// Every prompt the router sent
    pub prompts: Mutex<Vec<String>>,
}

impl MockImage {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_image(&self, bytes: impl Into<Vec<u8>>) {
        self.responses.lock().unwrap().push_back(Ok(bytes.into()));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageService for MockImage {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock image queued")))
    }

    fn model_id(&self) -> &'static str {
        "mock-image"
    }
}

// ============================================================================
// In-memory Image Store
// ============================================================================

/// Keeps saved images in memory, optionally failing every write
#[derive(Default)]
pub struct MemoryImageStore {
    fail: bool,
    pub saved: Mutex<Vec<Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<Vec<u8>> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn save(&self, bytes: &[u8]) -> Result<String, ImageStoreError> {
        if self.fail {
            return Err(ImageStoreError::Write {
                path: PathBuf::from("/static/generated.png"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saved.lock().unwrap().push(bytes.to_vec());
        Ok("/static/generated.png".to_string())
    }
}

// ============================================================================
// Fixed Wellness Provider
// ============================================================================

/// Deterministic wellness content, one fixed line per topic
pub struct FixedWellness;

impl FixedWellness {
    pub fn reply_for(topic: Topic) -> String {
        format!("fixed {} content", topic.as_str())
    }
}

impl WellnessProvider for FixedWellness {
    fn provide(&self, topic: Topic) -> String {
        Self::reply_for(topic)
    }
}
