use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, payload::JsonPayload};

#[derive(Debug, Deserialize)]
pub(crate) struct TtsRequest {
    text: String,
}

/// Insight text with optional base64 WAV audio
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TtsResponse {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_base64: Option<String>,
}

/// Handle `POST /api/tts`
pub(crate) async fn tts(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::InvalidInput);
    }

    tracing::debug!(chars = request.text.chars().count(), "generating insights");

    let text = state.insight.generate(&request.text).await?;

    let audio_base64 = match &state.speech {
        Some(speech) => Some(speech.synthesize(&text).await?),
        None => None,
    };

    Ok(Json(TtsResponse { text, audio_base64 }))
}
