//! Mock Gemini backend for integration tests
//!
//! Answers `generateContent` calls with a canned text reply or PCM audio,
//! and records what it was sent

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::Engine as _;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Mock Gemini backend that returns predictable responses
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    text_count: AtomicU32,
    speech_count: AtomicU32,
    reply: Option<String>,
    audio: Option<Vec<u8>>,
    text_status: Option<StatusCode>,
    speech_status: Option<StatusCode>,
    api_keys: Mutex<Vec<String>>,
    text_requests: Mutex<Vec<(String, Value)>>,
    speech_requests: Mutex<Vec<(String, Value)>>,
}

/// Canned behavior of a [`MockGemini`]
pub struct MockGeminiBuilder {
    reply: Option<String>,
    audio: Option<Vec<u8>>,
    text_status: Option<StatusCode>,
    speech_status: Option<StatusCode>,
}

impl MockGeminiBuilder {
    /// Text returned by the insight model; `None` returns no text part
    pub fn reply(mut self, reply: Option<&str>) -> Self {
        self.reply = reply.map(str::to_owned);
        self
    }

    /// PCM returned by the speech model; `None` returns no inline data
    pub fn audio(mut self, audio: Option<Vec<u8>>) -> Self {
        self.audio = audio;
        self
    }

    /// Fail text requests with `status`
    pub fn text_status(mut self, status: u16) -> Self {
        self.text_status = Some(StatusCode::from_u16(status).expect("valid status"));
        self
    }

    /// Fail speech requests with `status`
    pub fn speech_status(mut self, status: u16) -> Self {
        self.speech_status = Some(StatusCode::from_u16(status).expect("valid status"));
        self
    }

    /// Start the mock server, returning immediately
    pub async fn start(self) -> anyhow::Result<MockGemini> {
        let state = Arc::new(MockGeminiState {
            text_count: AtomicU32::new(0),
            speech_count: AtomicU32::new(0),
            reply: self.reply,
            audio: self.audio,
            text_status: self.text_status,
            speech_status: self.speech_status,
            api_keys: Mutex::new(Vec::new()),
            text_requests: Mutex::new(Vec::new()),
            speech_requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1beta/models/{call}", routing::post(handle_generate_content))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockGemini { addr, shutdown, state })
    }
}

impl MockGemini {
    /// Builder with a default text reply and a short PCM clip
    pub fn builder() -> MockGeminiBuilder {
        MockGeminiBuilder {
            reply: Some("Key takeaways from the article.".to_owned()),
            audio: Some(sample_pcm()),
            text_status: None,
            speech_status: None,
        }
    }

    /// Start a mock server with default behavior
    pub async fn start() -> anyhow::Result<Self> {
        Self::builder().start().await
    }

    /// Base URL for configuring the mock as the Gemini endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Number of insight requests received
    pub fn text_count(&self) -> u32 {
        self.state.text_count.load(Ordering::Relaxed)
    }

    /// Number of speech requests received
    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }

    /// `x-goog-api-key` values seen so far
    pub fn api_keys(&self) -> Vec<String> {
        self.state.api_keys.lock().unwrap().clone()
    }

    /// Model path and body of every insight request
    pub fn text_requests(&self) -> Vec<(String, Value)> {
        self.state.text_requests.lock().unwrap().clone()
    }

    /// Model path and body of every speech request
    pub fn speech_requests(&self) -> Vec<(String, Value)> {
        self.state.speech_requests.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Little-endian 16-bit samples used as the default audio
pub fn sample_pcm() -> Vec<u8> {
    [0i16, 1200, -1200, 32767, -32768]
        .iter()
        .flat_map(|sample| sample.to_le_bytes())
        .collect()
}

async fn handle_generate_content(
    State(state): State<Arc<MockGeminiState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        state.api_keys.lock().unwrap().push(key.to_owned());
    }

    let Some(model) = call.strip_suffix(":generateContent") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let is_speech = body["generationConfig"]["responseModalities"]
        .as_array()
        .is_some_and(|modalities| modalities.iter().any(|m| m == "AUDIO"));

    if is_speech {
        state.speech_count.fetch_add(1, Ordering::Relaxed);
        state.speech_requests.lock().unwrap().push((model.to_owned(), body));

        if let Some(status) = state.speech_status {
            return error_response(status);
        }

        let parts = match &state.audio {
            Some(pcm) => json!([{
                "inlineData": {
                    "mimeType": "audio/L16;codec=pcm;rate=24000",
                    "data": base64::engine::general_purpose::STANDARD.encode(pcm),
                }
            }]),
            None => json!([]),
        };

        return Json(json!({"candidates": [{"content": {"role": "model", "parts": parts}, "finishReason": "STOP"}]}))
            .into_response();
    }

    state.text_count.fetch_add(1, Ordering::Relaxed);
    state.text_requests.lock().unwrap().push((model.to_owned(), body));

    if let Some(status) = state.text_status {
        return error_response(status);
    }

    let parts = match &state.reply {
        Some(reply) => json!([{"text": reply}]),
        None => json!([]),
    };

    Json(json!({
        "candidates": [{"content": {"role": "model", "parts": parts}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
    }))
    .into_response()
}

fn error_response(status: StatusCode) -> Response {
    let body = json!({
        "error": {
            "code": status.as_u16(),
            "message": "mock failure",
            "status": if status == StatusCode::TOO_MANY_REQUESTS { "RESOURCE_EXHAUSTED" } else { "INTERNAL" },
        }
    });

    (status, Json(body)).into_response()
}
