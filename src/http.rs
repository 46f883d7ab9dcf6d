//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a request timeout. No retry or
//! backoff layer exists on top of this; a failed call fails the invocation.

use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("substack-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}
