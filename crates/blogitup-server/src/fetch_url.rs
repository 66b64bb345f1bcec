use axum::{Json, extract::RawQuery, extract::State};
use extract::{ExtractionResult, parse_http_url};

use crate::{AppState, error::ApiError};

/// Handle `GET /api/fetch-url?url=...`
///
/// Only the first `url` parameter is considered.
pub(crate) async fn fetch_url(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ExtractionResult>, ApiError> {
    let target = query
        .as_deref()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
        })
        .and_then(|raw| parse_http_url(&raw))
        .ok_or(ApiError::InvalidUrl)?;

    tracing::debug!(url = %target, "extracting article");

    let article = state.extractor.extract(&target).await?;

    Ok(Json(article))
}
