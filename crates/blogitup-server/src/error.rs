use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use extract::ExtractError;
use gemini::GeminiError;
use serde::Serialize;
use thiserror::Error;

/// Message returned when the Gemini quota is exhausted
pub const RATE_LIMIT_MESSAGE: &str = "You hit your daily Gemini TTS limit. Try again tomorrow or upgrade your plan.";

/// Request failures with their HTTP status and client-facing message
#[derive(Debug, Error)]
pub enum ApiError {
    /// `url` query parameter missing or not an http(s) URL
    #[error("Invalid or missing URL")]
    InvalidUrl,

    /// The article pipeline failed
    #[error("Failed to extract article content")]
    Extraction(#[source] ExtractError),

    /// TTS body is not JSON with a non-empty `text` string
    #[error("Invalid input")]
    InvalidInput,

    /// Body exceeded the size limit
    #[error("Request body is too large")]
    PayloadTooLarge,

    /// Gemini answered 429
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited(#[source] GeminiError),

    /// Speech response carried no audio
    #[error("Audio generation failed")]
    NoAudio,

    /// Any other Gemini failure
    #[error("Internal Server Error")]
    Upstream(#[source] GeminiError),

    /// No route for this method and path
    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl | Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Extraction(_) | Self::NoAudio | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    fn log(&self) {
        match self {
            Self::Extraction(source) => tracing::error!(error = %source, "article extraction failed"),
            Self::RateLimited(source) => tracing::warn!(error = %source, "Gemini quota exhausted"),
            Self::NoAudio => tracing::error!("speech model returned no audio"),
            Self::Upstream(source) => tracing::error!(error = %source, "Gemini request failed"),
            Self::InvalidUrl | Self::InvalidInput | Self::PayloadTooLarge | Self::NotFound => {
                tracing::debug!(status = %self.status_code(), "rejected request: {self}");
            }
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(error: ExtractError) -> Self {
        Self::Extraction(error)
    }
}

impl From<GeminiError> for ApiError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::NoAudio => Self::NoAudio,
            error if error.is_rate_limited() => Self::RateLimited(error),
            error => Self::Upstream(error),
        }
    }
}

/// Error body shared by every JSON failure response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorBody {
            error: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
