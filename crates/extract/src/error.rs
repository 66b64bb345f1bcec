use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failures of the article extraction pipeline
///
/// Every variant is an upstream failure from the caller's point of view;
/// none of the details are meant for API consumers.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Network failure, timeout or unreadable body
    #[error("Failed to fetch page: {0}")]
    Fetch(String),

    /// The page answered with a non-success status
    #[error("Page returned status {0}")]
    Status(u16),

    /// The page body is not textual
    #[error("Page content type '{0}' is not text")]
    NotText(String),

    /// Readability produced no main content
    #[error("Unable to parse article")]
    NoContent,

    /// The extracted HTML could not be rendered as text
    #[error("Failed to render article text: {0}")]
    Render(String),
}
