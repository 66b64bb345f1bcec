#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! HTTP surface of blogitup: routing, CORS and error mapping

mod cors;
mod error;
mod fetch_url;
mod payload;
mod ping;
mod tts;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use blogitup_config::Config;
use extract::ArticleExtractor;
use gemini::{GeminiClient, InsightGenerator, SpeechSynthesizer};
use tower_http::trace::TraceLayer;

pub use cors::CorsPolicy;
pub use error::{ApiError, RATE_LIMIT_MESSAGE};

/// Capabilities shared by every request
#[derive(Clone)]
pub struct AppState {
    extractor: Arc<ArticleExtractor>,
    insight: InsightGenerator,
    /// Present only when audio output is enabled
    speech: Option<SpeechSynthesizer>,
}

impl AppState {
    pub fn new(extractor: ArticleExtractor, insight: InsightGenerator, speech: Option<SpeechSynthesizer>) -> Self {
        Self {
            extractor: Arc::new(extractor),
            insight,
            speech,
        }
    }

    /// Build the production capabilities from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the Gemini API
    /// key is missing
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let extractor = ArticleExtractor::from_config(&config.extract)
            .map_err(|e| anyhow::anyhow!("Failed to initialize article extractor: {e}"))?;

        let gemini = Arc::new(
            GeminiClient::from_config(&config.gemini)
                .map_err(|e| anyhow::anyhow!("Failed to initialize Gemini client: {e}"))?,
        );

        let speech = config.gemini.audio.then(|| SpeechSynthesizer::new(gemini.clone()));

        Ok(Self::new(extractor, InsightGenerator::new(gemini), speech))
    }
}

/// Build the application router with CORS and request tracing
pub fn router(state: AppState, cors: CorsPolicy) -> Router {
    Router::new()
        .route("/api/fetch-url", get(fetch_url::fetch_url))
        .route("/api/tts", post(tts::tts))
        .route("/api/ping", get(ping::ping))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(Arc::new(cors), cors::cors_middleware))
        .layer(TraceLayer::new_for_http())
}

#[allow(clippy::unused_async)]
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS policy is invalid or a client cannot be
    /// initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let state = AppState::from_config(config)?;
        let cors = CorsPolicy::from_config(&config.server.cors)?;

        if config.gemini.audio {
            tracing::info!(voice = %config.gemini.voice, "audio output enabled");
        }

        Ok(Self::from_parts(state, cors, config.server.listen_address()))
    }

    /// Assemble a server from prebuilt capabilities
    pub fn from_parts(state: AppState, cors: CorsPolicy, listen_address: SocketAddr) -> Self {
        Self {
            router: router(state, cors),
            listen_address,
        }
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
