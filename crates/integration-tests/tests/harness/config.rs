//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use blogitup_config::{Config, GeminiConfig, Origins, ServerConfig};
use secrecy::SecretString;

/// API key every test server sends upstream
pub const TEST_API_KEY: &str = "test-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                gemini: GeminiConfig {
                    api_key: Some(SecretString::from(TEST_API_KEY)),
                    ..GeminiConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point Gemini calls at a mock backend
    pub fn with_gemini(mut self, base_url: &str) -> Self {
        self.config.gemini.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Attach synthesized audio to TTS responses
    pub fn with_audio(mut self) -> Self {
        self.config.gemini.audio = true;
        self
    }

    /// Replace the CORS origin allow-list
    pub fn with_origins(mut self, origins: Origins) -> Self {
        self.config.server.cors.origins = origins;
        self
    }

    /// Remove the Gemini API key
    pub fn without_api_key(mut self) -> Self {
        self.config.gemini.api_key = None;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
