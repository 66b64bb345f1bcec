use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body limit for JSON requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Extractor for JSON request bodies
///
/// Unlike `axum::Json` it accepts any content type, and every rejection is
/// an [`ApiError`] so clients always receive the `{"error": ...}` shape.
pub struct JsonPayload<T>(pub T);

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|err| {
                if std::error::Error::source(&err)
                    .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
                {
                    ApiError::PayloadTooLarge
                } else {
                    tracing::debug!("failed to read request body: {err}");
                    ApiError::InvalidInput
                }
            })?;

        serde_json::from_slice::<T>(&bytes).map(Self).map_err(|e| {
            tracing::debug!("failed to parse request body: {e}");
            ApiError::InvalidInput
        })
    }
}
