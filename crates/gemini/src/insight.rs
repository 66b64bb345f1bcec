use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Instruction sent ahead of the article text
pub const INSIGHT_INSTRUCTION: &str = "You are an AI that analyzes blog content and provides meaningful insights. \
Summarize the key takeaways, highlight interesting points, and provide thoughtful observations. \
Do not simply rephrase the content. Aim to help a curious reader understand the most important and interesting ideas.";

/// Reply used when the model returns no text
pub const FALLBACK_REPLY: &str = "No response.";

/// A text generation model
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Send `instruction` and `text` as one user turn and return the first
    /// candidate's text, if there is one
    async fn complete(&self, instruction: &str, text: &str) -> Result<Option<String>>;
}

/// Produces commentary on article text
#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn TextModel>,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Generate insights for `text`
    ///
    /// # Errors
    ///
    /// Propagates upstream failures unchanged
    pub async fn generate(&self, text: &str) -> Result<String> {
        let reply = self.model.complete(INSIGHT_INSTRUCTION, text).await?;

        Ok(reply.unwrap_or_else(|| {
            tracing::warn!("insight model returned no text");
            FALLBACK_REPLY.to_string()
        }))
    }
}
