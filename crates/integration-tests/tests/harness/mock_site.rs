//! Mock web site serving blog pages for extraction tests

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Title of the article served at `/article`
pub const ARTICLE_TITLE: &str = "Understanding Ownership in Rust";

/// Opening words of the first paragraph of `/article`
pub const ARTICLE_OPENING: &str = "Ownership is the feature that sets Rust apart";

/// Mock web site with a handful of fixed pages
pub struct MockSite {
    addr: SocketAddr,
    shutdown: CancellationToken,
    hits: Arc<AtomicU32>,
}

impl MockSite {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let hits = Arc::new(AtomicU32::new(0));

        let app = Router::new()
            .route("/article", routing::get(article))
            .route("/long", routing::get(long_article))
            .route("/image.png", routing::get(image))
            .route("/gone", routing::get(|| async { StatusCode::NOT_FOUND }))
            .layer(axum::middleware::from_fn_with_state(Arc::clone(&hits), count_hits));

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

        Ok(Self { addr, shutdown, hits })
    }

    /// Absolute URL of `path` on this site
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Number of requests received
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::Relaxed)
    }
}

impl Drop for MockSite {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn count_hits(
    State(hits): State<Arc<AtomicU32>>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}

fn page(title: &str, paragraphs: &[String]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>\n")).collect();

    format!(
        "<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
<nav><a href=\"/\">Home</a> <a href=\"/about\">About</a></nav>
<article>
<h1>{title}</h1>
<img src=\"/hero.png\" alt=\"hero\">
{body}</article>
<footer>Copyright blog.example</footer>
</body>
</html>"
    )
}

async fn article() -> Html<String> {
    let paragraphs = vec![
        format!(
            "{ARTICLE_OPENING} from other systems languages. Every value has a single owner, and when the owner \
             goes out of scope the value is dropped. This simple rule removes a whole class of memory bugs \
             without a garbage collector."
        ),
        "Borrowing lets code use a value without taking ownership of it. Shared references allow many readers \
         at once, while a mutable reference guarantees exclusive access. The borrow checker enforces these rules \
         at compile time, so the running program pays nothing for them."
            .to_owned(),
        "Lifetimes describe how long references stay valid. Most of the time the compiler infers them, but \
         <a href=\"/lifetimes\">explicit lifetime annotations</a> become necessary when a function returns a \
         reference derived from one of several inputs."
            .to_owned(),
    ];

    Html(page(ARTICLE_TITLE, &paragraphs))
}

async fn long_article() -> Html<String> {
    let paragraphs: Vec<String> = (1..=40)
        .map(|i| {
            format!(
                "Paragraph {i} explains yet another corner of asynchronous Rust, covering executors, wakers and \
                 pinning in enough detail that the article grows well beyond a few thousand characters."
            )
        })
        .collect();

    Html(page("A Very Long Post About Async Rust", &paragraphs))
}

async fn image() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], vec![0x89u8, b'P', b'N', b'G'])
}
