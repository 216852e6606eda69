//! Hugging Face text-to-image inference client
//!
//! Posts `{"inputs": prompt}` to the model endpoint and expects the encoded
//! image back as the raw response body.

use super::{ImageService, LlmError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-dev";

/// Text-to-image service
pub struct TextToImageService {
    client: Client,
    api_key: String,
    model: String,
    url: String,
}

impl TextToImageService {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
    ) -> Self {
        let model = model.into();
        let url = format!("{}/{model}", base_url.trim_end_matches('/'));
        Self {
            client,
            api_key: api_key.into(),
            model,
            url,
        }
    }

    /// A success status can still carry a JSON error instead of an image
    fn check_image_body(content_type: Option<&str>, body: Vec<u8>) -> Result<Vec<u8>, LlmError> {
        if body.is_empty() {
            return Err(LlmError::unknown("Empty image response"));
        }

        let is_json = content_type.is_some_and(|ct| ct.starts_with("application/json"));
        if is_json {
            let detail = serde_json::from_slice::<InferenceError>(&body).map_or_else(
                |_| String::from_utf8_lossy(&body).into_owned(),
                |e| e.error,
            );
            return Err(LlmError::unknown(format!(
                "Expected image bytes, got JSON: {detail}"
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl ImageService for TextToImageService {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?
            .to_vec();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let message = serde_json::from_str::<InferenceError>(&text)
                .map_or_else(|_| text.to_string(), |e| e.error);
            return Err(LlmError::from_status(status.as_u16(), &message));
        }

        Self::check_image_body(content_type.as_deref(), body)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}
