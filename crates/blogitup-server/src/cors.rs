use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use blogitup_config::{CorsConfig, Origins};
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};

/// Value sent in `Access-Control-Allow-Origin` for origins outside the allow-list
static NULL_ORIGIN: HeaderValue = HeaderValue::from_static("null");

#[derive(Debug, Clone)]
enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Resolves the CORS headers for a request origin
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: AllowedOrigins,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Build the policy from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an origin, method list or header list is not a
    /// valid header value
    pub fn from_config(config: &CorsConfig) -> anyhow::Result<Self> {
        let origins = match &config.origins {
            Origins::Any => AllowedOrigins::Any,
            Origins::List(origins) => AllowedOrigins::List(
                origins
                    .iter()
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .map_err(|e| anyhow::anyhow!("invalid CORS origin '{origin}': {e}"))
                    })
                    .collect::<anyhow::Result<_>>()?,
            ),
        };

        let allow_methods = HeaderValue::from_str(&config.methods.join(", "))
            .map_err(|e| anyhow::anyhow!("invalid CORS methods: {e}"))?;
        let allow_headers = HeaderValue::from_str(&config.headers.join(", "))
            .map_err(|e| anyhow::anyhow!("invalid CORS headers: {e}"))?;

        Ok(Self {
            origins,
            allow_methods,
            allow_headers,
        })
    }

    /// CORS headers for a request carrying `origin`
    pub fn headers_for(&self, origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);

        let allow_origin = match &self.origins {
            AllowedOrigins::Any => HeaderValue::from_static("*"),
            AllowedOrigins::List(allowed) => {
                headers.insert(header::VARY, HeaderValue::from_static("Origin"));

                origin
                    .filter(|origin| allowed.contains(origin))
                    .cloned()
                    .unwrap_or_else(|| NULL_ORIGIN.clone())
            }
        };

        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());

        headers
    }
}

/// Apply the CORS policy to every response
///
/// Preflight requests are answered here with 204 and never reach routing.
pub async fn cors_middleware(State(policy): State<Arc<CorsPolicy>>, request: Request, next: Next) -> Response {
    let cors_headers = policy.headers_for(request.headers().get(header::ORIGIN));

    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "answering preflight");
        return (StatusCode::NO_CONTENT, cors_headers).into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().extend(cors_headers);

    response
}
