//! Answer generation via an external language-model service.

mod ollama;

pub use ollama::OllamaGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt, non-streaming.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
