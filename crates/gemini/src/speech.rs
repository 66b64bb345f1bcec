use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::{
    error::Result,
    wav::{GEMINI_TTS_FORMAT, PcmFormat, wrap_pcm_as_wav},
};

/// A speech synthesis model producing raw PCM
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Synthesize `text` and return decoded PCM samples
    async fn synthesize_pcm(&self, text: &str) -> Result<Vec<u8>>;
}

/// Turns text into base64-encoded WAV audio
#[derive(Clone)]
pub struct SpeechSynthesizer {
    model: Arc<dyn SpeechModel>,
    format: PcmFormat,
}

impl SpeechSynthesizer {
    pub fn new(model: Arc<dyn SpeechModel>) -> Self {
        Self::with_format(model, GEMINI_TTS_FORMAT)
    }

    pub fn with_format(model: Arc<dyn SpeechModel>, format: PcmFormat) -> Self {
        Self { model, format }
    }

    /// Synthesize `text` and return the WAV file as standard base64
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeminiError::NoAudio`] when the model returned no
    /// audio, or the upstream error otherwise
    pub async fn synthesize(&self, text: &str) -> Result<String> {
        let pcm = self.model.synthesize_pcm(text).await?;
        let wav = wrap_pcm_as_wav(&pcm, self.format)?;

        Ok(STANDARD.encode(wav))
    }
}
