//! # Backend Configuration
//!
//! Configuration for the kiosk backend API client.
//! The API token is loaded from environment variables, never hardcoded.

use desk_core::DeskError;
use std::env;

/// Kiosk backend API configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "https://kiosk.example.org/api")
    pub api_url: String,

    /// Bearer token for the Authorization header
    pub api_token: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CASHDESK_API_URL`
    /// - `CASHDESK_API_TOKEN`
    pub fn from_env() -> Result<Self, DeskError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("CASHDESK_API_URL")
            .map_err(|_| DeskError::Configuration("CASHDESK_API_URL not set".to_string()))?;

        let api_token = env::var("CASHDESK_API_TOKEN")
            .map_err(|_| DeskError::Configuration("CASHDESK_API_TOKEN not set".to_string()))?;

        Self::validated(api_url, api_token)
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }

    fn validated(api_url: String, api_token: String) -> Result<Self, DeskError> {
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(DeskError::Configuration(
                "CASHDESK_API_URL must start with http:// or https://".to_string(),
            ));
        }

        if api_token.trim().is_empty() {
            return Err(DeskError::Configuration(
                "CASHDESK_API_TOKEN must not be empty".to_string(),
            ));
        }

        Ok(Self::new(api_url, api_token))
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    /// Builder: set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// Endpoint paths are joined as "{api_url}{path}"; a trailing slash on the
// base would produce double slashes.
fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
