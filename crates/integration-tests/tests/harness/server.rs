//! Test server wrapper that starts blogitup on a random port

use std::net::SocketAddr;

use blogitup_config::Config;
use blogitup_server::Server;
use tokio_util::sync::CancellationToken;

/// Origin accepted by the default CORS allow-list
pub const FRONTEND_ORIGIN: &str = "https://blogitup-fe.vercel.app";

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `GET /api/fetch-url` for `target`, sent from the front-end origin
    pub async fn fetch_url(&self, target: &str) -> reqwest::Response {
        self.client
            .get(self.url("/api/fetch-url"))
            .query(&[("url", target)])
            .header("Origin", FRONTEND_ORIGIN)
            .send()
            .await
            .expect("request failed")
    }

    /// `POST /api/tts` with a raw body, sent from the front-end origin
    pub async fn tts(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.client
            .post(self.url("/api/tts"))
            .header("Origin", FRONTEND_ORIGIN)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("request failed")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
