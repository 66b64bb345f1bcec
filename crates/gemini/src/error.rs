use thiserror::Error;

use crate::wav::WavError;

pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini API errors
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The HTTP client could not be constructed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Quota or rate limit exhausted upstream (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// API returned a non-success status other than 429
    #[error("Gemini API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Speech response carried no inline audio
    #[error("No audio in speech response")]
    NoAudio,

    /// Audio could not be wrapped for transport
    #[error(transparent)]
    Audio(#[from] WavError),
}

impl GeminiError {
    /// Whether the upstream reported quota exhaustion
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}
