use std::time::Duration;

use reqwest::Client;

use crate::error::{GeminiError, Result};

/// Build the pooled HTTP client shared by every Gemini call
pub fn http_client(timeout: Duration) -> Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| GeminiError::ConfigError(format!("Failed to build HTTP client: {e}")))
}
