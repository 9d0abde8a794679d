//! Client configuration

use std::time::Duration;
use vitrina_core::Config;

/// Connection settings for one HTTP endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Document store endpoint from the application config
    pub fn store(config: &Config) -> Self {
        let client = Self::new(config.store_url.clone()).with_timeout(config.request_timeout());
        match &config.store_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    /// Image upload endpoint from the application config
    pub fn upload(config: &Config) -> Self {
        Self::new(config.upload_url.clone()).with_timeout(config.request_timeout())
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
