use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Google Generative Language API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key; may be supplied through `GEMINI_API_KEY` instead
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model used to generate insights
    #[serde(default = "default_insight_model")]
    pub insight_model: String,
    /// Model used for speech synthesis
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    /// Prebuilt voice preset for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Attach synthesized audio to `/api/tts` responses
    #[serde(default)]
    pub audio: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            insight_model: default_insight_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            audio: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Get the request timeout as Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_insight_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn deserialize_minimal_config() {
        let config: GeminiConfig = toml::from_str("").unwrap();

        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
        assert_eq!(config.insight_model, "gemini-1.5-flash");
        assert_eq!(config.speech_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.voice, "Kore");
        assert!(!config.audio);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
            api_key = "secret"
            base_url = "http://127.0.0.1:9999/v1beta"
            insight_model = "gemini-2.0-flash"
            voice = "Puck"
            audio = true
            timeout_secs = 5
        "#;

        let config: GeminiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_key.unwrap().expose_secret(), "secret");
        assert_eq!(config.base_url.unwrap().as_str(), "http://127.0.0.1:9999/v1beta");
        assert_eq!(config.insight_model, "gemini-2.0-flash");
        assert_eq!(config.voice, "Puck");
        assert!(config.audio);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(toml::from_str::<GeminiConfig>("model = \"x\"").is_err());
    }
}
