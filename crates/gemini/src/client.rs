use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use blogitup_config::{DEFAULT_GEMINI_BASE_URL, GeminiConfig};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::{GeminiError, Result},
    http_client::http_client,
    insight::TextModel,
    protocol::{
        Content, ErrorResponse, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
        PrebuiltVoiceConfig, SpeechConfig, VoiceConfig,
    },
    speech::SpeechModel,
};

/// Header carrying the API key on every request
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    insight_model: String,
    speech_model: String,
    voice: String,
}

impl GeminiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| GeminiError::ConfigError("Gemini API key is not set".to_string()))?;

        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_GEMINI_BASE_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: http_client(config.timeout())?,
            base_url,
            api_key,
            insight_model: config.insight_model.clone(),
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
        })
    }

    /// POST a `generateContent` request for `model`
    async fn generate_content(&self, model: &str, body: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        tracing::debug!(model, parts = body.contents.iter().map(|c| c.parts.len()).sum::<usize>(), "Gemini request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {e}");
                GeminiError::ConnectionError(format!("Failed to send request to Gemini: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            tracing::error!(model, "Gemini API error ({status}): {message}");

            return Err(match status.as_u16() {
                429 => GeminiError::RateLimited(message),
                code => GeminiError::ApiError { status: code, message },
            });
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            tracing::error!(model, "Failed to parse Gemini response: {e}");
            GeminiError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn complete(&self, instruction: &str, text: &str) -> Result<Option<String>> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(instruction), Part::text(text)],
            }],
            generation_config: None,
        };

        let response = self.generate_content(&self.insight_model, &body).await?;

        Ok(response.first_text().map(str::to_string))
    }
}

#[async_trait]
impl SpeechModel for GeminiClient {
    async fn synthesize_pcm(&self, text: &str) -> Result<Vec<u8>> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(text)],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.voice.clone(),
                        },
                    },
                }),
            }),
        };

        let response = self.generate_content(&self.speech_model, &body).await?;

        let Some(data) = response.first_inline_data() else {
            tracing::warn!(model = %self.speech_model, "speech response carried no audio");
            return Err(GeminiError::NoAudio);
        };

        let pcm = STANDARD
            .decode(data)
            .map_err(|e| GeminiError::InvalidResponse(format!("audio is not valid base64: {e}")))?;

        tracing::debug!(bytes = pcm.len(), "Gemini speech synthesis complete");

        Ok(pcm)
    }
}
