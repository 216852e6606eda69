//! Startup configuration from environment variables

use crate::llm;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Credential for the hosted chat and image endpoints
pub const TOKEN_VAR: &str = "HF_TOKEN";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingCredential(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_token: String,
    pub port: u16,
    /// Directory served under `/static`, holding the generated image
    pub static_dir: PathBuf,
    pub chat_model: String,
    pub chat_base_url: String,
    pub image_model: String,
    pub image_base_url: String,
    /// Upper bound for each hosted model call
    pub downstream_timeout: Duration,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the API token is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Fails when the API token is missing or a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(TOKEN_VAR))?;

        let port = parse_or(&lookup, "SAKHI_PORT", DEFAULT_PORT)?;

        let timeout_secs = parse_or(&lookup, "SAKHI_DOWNSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SAKHI_DOWNSTREAM_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_token,
            port,
            static_dir: lookup("SAKHI_STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            chat_model: lookup("SAKHI_CHAT_MODEL")
                .unwrap_or_else(|| llm::openai::DEFAULT_MODEL.to_string()),
            chat_base_url: lookup("SAKHI_CHAT_BASE_URL")
                .unwrap_or_else(|| llm::openai::DEFAULT_BASE_URL.to_string()),
            image_model: lookup("SAKHI_IMAGE_MODEL")
                .unwrap_or_else(|| llm::inference::DEFAULT_MODEL.to_string()),
            image_base_url: lookup("SAKHI_IMAGE_BASE_URL")
                .unwrap_or_else(|| llm::inference::DEFAULT_BASE_URL.to_string()),
            downstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
