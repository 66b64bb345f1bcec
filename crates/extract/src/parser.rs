use blogitup_config::ExtractConfig;
use dom_smoothie::{Config, Readability};
use url::Url;

use crate::error::{ExtractError, Result};

/// Title and main-content HTML isolated from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArticle {
    pub title: String,
    pub content_html: String,
}

/// Capability to isolate the main article of an HTML document
pub trait ArticleParser: Send + Sync {
    /// Parse `html` as served from `base_url` and extract its article
    fn parse_article(&self, html: &str, base_url: &Url) -> Result<ParsedArticle>;
}

/// Readability extraction backed by `dom_smoothie`
pub struct ReadabilityParser {
    max_elements_to_parse: usize,
}

impl ReadabilityParser {
    pub const fn new(config: &ExtractConfig) -> Self {
        Self {
            max_elements_to_parse: config.max_elements_to_parse,
        }
    }
}

impl ArticleParser for ReadabilityParser {
    fn parse_article(&self, html: &str, base_url: &Url) -> Result<ParsedArticle> {
        let cfg = Config {
            max_elements_to_parse: self.max_elements_to_parse,
            ..Default::default()
        };

        // The base URL anchors relative links in the extracted content
        let mut readability = Readability::new(html, Some(base_url.as_str()), Some(cfg)).map_err(|e| {
            tracing::warn!(url = %base_url, error = %e, "failed to build document");
            ExtractError::NoContent
        })?;

        let article = readability.parse().map_err(|e| {
            tracing::warn!(url = %base_url, error = %e, "readability found no article");
            ExtractError::NoContent
        })?;

        let content_html = article.content.to_string();
        if content_html.trim().is_empty() {
            tracing::warn!(url = %base_url, "readability produced an empty fragment");
            return Err(ExtractError::NoContent);
        }

        Ok(ParsedArticle {
            title: article.title.trim().to_string(),
            content_html,
        })
    }
}
