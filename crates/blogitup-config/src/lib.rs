#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod extract;
pub mod gemini;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use extract::*;
pub use gemini::*;
pub use server::*;
pub use telemetry::*;

/// Top-level blogitup configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Article extraction configuration
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
