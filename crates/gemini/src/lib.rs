#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Gemini API client: article insights and speech synthesis

mod client;
mod error;
mod http_client;
mod insight;
pub mod protocol;
mod speech;
pub mod wav;

pub use client::GeminiClient;
pub use error::{GeminiError, Result};
pub use insight::{FALLBACK_REPLY, INSIGHT_INSTRUCTION, InsightGenerator, TextModel};
pub use speech::{SpeechModel, SpeechSynthesizer};
