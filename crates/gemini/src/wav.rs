//! RIFF/WAVE container for raw PCM audio

use thiserror::Error;

/// Size of the canonical PCM WAV header
pub const WAV_HEADER_LEN: usize = 44;

/// Layout of interleaved little-endian PCM samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

/// Format of the audio returned by Gemini speech models: mono, 24 kHz, 16-bit
pub const GEMINI_TTS_FORMAT: PcmFormat = PcmFormat {
    channels: 1,
    sample_rate: 24_000,
    bits_per_sample: 16,
};

impl PcmFormat {
    /// Bytes per sample frame across all channels, or `None` if it overflows
    pub const fn block_align(self) -> Option<u16> {
        self.channels.checked_mul(self.bits_per_sample.div_ceil(8))
    }

    /// Bytes of audio per second, or `None` if it overflows
    pub fn byte_rate(self) -> Option<u32> {
        self.block_align()
            .and_then(|align| self.sample_rate.checked_mul(u32::from(align)))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("PCM payload of {0} bytes does not fit in a WAV container")]
    TooLarge(usize),

    #[error("Invalid PCM format: {0}")]
    InvalidFormat(&'static str),
}

/// Wrap raw PCM bytes in a WAV container with the given format
///
/// The samples are copied verbatim after a 44-byte header.
pub fn wrap_pcm_as_wav(pcm: &[u8], format: PcmFormat) -> Result<Vec<u8>, WavError> {
    if format.channels == 0 {
        return Err(WavError::InvalidFormat("channel count must be positive"));
    }
    if format.sample_rate == 0 {
        return Err(WavError::InvalidFormat("sample rate must be positive"));
    }
    if format.bits_per_sample == 0 {
        return Err(WavError::InvalidFormat("bit depth must be positive"));
    }

    let block_align = format
        .block_align()
        .ok_or(WavError::InvalidFormat("block alignment overflows u16"))?;
    let byte_rate = format
        .byte_rate()
        .ok_or(WavError::InvalidFormat("byte rate overflows u32"))?;

    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| len.checked_add(36).is_some())
        .ok_or(WavError::TooLarge(pcm.len()))?;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);

    Ok(wav)
}
