use async_trait::async_trait;
use blogitup_config::ExtractConfig;
use reqwest::Client;
use url::Url;

use crate::error::{ExtractError, Result};

/// Capability to download a page as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the decoded response body
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// Fetches pages over HTTP with reqwest
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "page request failed");
            ExtractError::Fetch(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "page returned error status");
            return Err(ExtractError::Status(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            && !is_textual(content_type)
        {
            tracing::warn!(%url, content_type, "page is not text");
            return Err(ExtractError::NotText(content_type.to_string()));
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "failed to read page body");
            ExtractError::Fetch(e.to_string())
        })?;

        tracing::debug!(%url, bytes = body.len(), "page fetched");

        Ok(body)
    }
}

/// Whether a `Content-Type` value describes something we can read as HTML text
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}
