#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Readable article extraction: fetch a page, isolate its main content and
//! shape it into bounded plain text

mod error;
mod fetcher;
mod parser;
pub mod text;
mod validate;

use std::sync::Arc;

use blogitup_config::ExtractConfig;
use serde::Serialize;
use url::Url;

pub use error::{ExtractError, Result};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use parser::{ArticleParser, ParsedArticle, ReadabilityParser};
pub use text::MAX_TEXT_CHARS;
pub use validate::{is_valid_http_url, parse_http_url};

/// Article title and its readable text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    /// At most [`MAX_TEXT_CHARS`] characters, trimmed, without the leading title
    pub text_content: String,
}

/// Runs the fetch → readability → text pipeline for a single URL
pub struct ArticleExtractor {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn ArticleParser>,
}

impl ArticleExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, parser: Arc<dyn ArticleParser>) -> Self {
        Self { fetcher, parser }
    }

    /// Build the production extractor from configuration
    pub fn from_config(config: &ExtractConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpPageFetcher::new(config)?),
            Arc::new(ReadabilityParser::new(config)),
        ))
    }

    /// Extract the article at `url`
    ///
    /// Any failing step aborts the pipeline; nothing is retried.
    pub async fn extract(&self, url: &Url) -> Result<ExtractionResult> {
        let html = self.fetcher.fetch_page(url).await?;

        let article = self.parser.parse_article(&html, url)?;
        let text = text::html_to_text(&article.content_html)?;

        // A fragment with nothing readable in it still counts as an article
        let text_content = text::shape_text(&text, &article.title);

        tracing::debug!(
            %url,
            title = %article.title,
            chars = text_content.chars().count(),
            "article extracted"
        );

        Ok(ExtractionResult {
            title: article.title,
            text_content,
        })
    }
}
