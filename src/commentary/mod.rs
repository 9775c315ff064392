//! Roast generation.
//!
//! The analysis is embedded into a fixed prompt and sent to a hosted
//! text-generation model through a [`TextGenerator`]. Generation never fails
//! from the caller's point of view: any error turns into
//! [`fallback_text`], which still shows the raw numbers.

mod openai;

pub use openai::OpenAiGenerator;

use async_trait::async_trait;
use thiserror::Error;

use crate::{analysis::TasteAnalysis, warning};

pub const TEMPERATURE: f32 = 1.2;
pub const MAX_TOKENS: u32 = 500;
pub const FAILURE_NOTICE: &str = "failed to generate roast 💀";

pub const SYSTEM_PROMPT: &str = "u r a savage 16yo tiktok addict roasting mid music taste";

const USER_PROMPT: &str = "analyze this music data like a chaotic tiktok teen using:
- all lowercase + emojis every 3-5 words
- gen-z/alpha slang (rizz, gyatt, skibidi, fanum tax, etc)
- savage roasts + tiktok refs
- sections: vibe check, aux royalty, genre gyatt, toxic truth

data: ";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}

/// Builds the single completion request sent for an analysis.
pub fn build_request(analysis: &TasteAnalysis) -> CompletionRequest {
    let data = serde_json::to_string(analysis).unwrap_or_default();
    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt: format!("{}{}", USER_PROMPT, data),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Text shown when generation fails: a notice followed by the analysis as pretty JSON.
pub fn fallback_text(analysis: &TasteAnalysis) -> String {
    let dump = serde_json::to_string_pretty(analysis).unwrap_or_default();
    format!("{}\n{}", FAILURE_NOTICE, dump)
}

pub async fn generate_commentary(generator: &dyn TextGenerator, analysis: &TasteAnalysis) -> String {
    let request = build_request(analysis);
    match generator.complete(&request).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warning!("Text generation returned an empty completion");
            fallback_text(analysis)
        }
        Err(e) => {
            warning!("Text generation failed: {}", e);
            fallback_text(analysis)
        }
    }
}
