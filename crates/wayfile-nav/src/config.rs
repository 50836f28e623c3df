//! Navigator and client configuration.

use std::time::Duration;

use derive_builder::{Builder, UninitializedFieldError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfile_core::ViewMode;

/// Default request timeout for the HTTP listing service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do with a listing response that is not for the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Discard responses superseded by a newer request.
    #[default]
    DropStale,
    /// Apply every response in completion order; the last one to finish
    /// wins even if it belongs to an older request.
    LastCompletedWins,
}

/// Configuration for a [`Navigator`](crate::Navigator).
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct NavigatorConfig {
    /// Handling of out-of-order listing responses.
    #[builder(default)]
    #[serde(default)]
    pub stale_policy: StalePolicy,

    /// Key the view mode is persisted under.
    #[builder(default = "ViewMode::PREFERENCE_KEY.to_string()")]
    #[serde(default = "default_preference_key")]
    pub preference_key: String,
}

fn default_preference_key() -> String {
    ViewMode::PREFERENCE_KEY.to_string()
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            stale_policy: StalePolicy::default(),
            preference_key: default_preference_key(),
        }
    }
}

impl NavigatorConfig {
    pub fn builder() -> NavigatorConfigBuilder {
        NavigatorConfigBuilder::default()
    }
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration field: {0}")]
    MissingField(&'static str),

    #[error("Invalid server URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<UninitializedFieldError> for ConfigError {
    fn from(err: UninitializedFieldError) -> Self {
        Self::MissingField(err.field_name())
    }
}

/// Connection settings for the HTTP listing service.
#[derive(Debug, Clone, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "ConfigError")
)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:3001`.
    pub base_url: String,

    /// Bearer token sent with every request.
    #[builder(default, setter(strip_option))]
    pub auth_token: Option<String>,

    /// Per-request timeout.
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
}

impl ClientConfigBuilder {
    fn validate(&self) -> Result<(), ConfigError> {
        match &self.base_url {
            Some(url) if url.trim().is_empty() => Err(ConfigError::InvalidBaseUrl(url.clone())),
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                Err(ConfigError::InvalidBaseUrl(url.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Base URL without a trailing slash.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
