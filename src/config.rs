//! Environment-derived configuration
//!
//! Configuration is read fresh for every tool invocation, so a credential
//! exported after the server started is picked up without a restart.

use crate::error::AppError;

/// Default API host when SUBSTACK_HOSTNAME is not set
pub const DEFAULT_HOSTNAME: &str = "substack.com";

/// Per-invocation configuration for the Substack API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Session credential sent as the `connect.sid` cookie
    pub api_key: String,
    /// Publication hostname, e.g. `example.substack.com`
    pub hostname: String,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("SUBSTACK_API_KEY").ok();
        let hostname = std::env::var("SUBSTACK_HOSTNAME").ok();
        Self::from_values(api_key, hostname)
    }

    /// Build configuration from explicit values (shared with tests)
    pub fn from_values(
        api_key: Option<String>,
        hostname: Option<String>,
    ) -> Result<Self, AppError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(AppError::Config(
                    "SUBSTACK_API_KEY not configured".to_string(),
                ))
            }
        };

        let hostname = hostname
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string());

        Ok(Self { api_key, hostname })
    }

    /// Base URL for API requests
    pub fn base_url(&self) -> String {
        format!("https://{}", self.hostname)
    }
}
