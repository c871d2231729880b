use async_trait::async_trait;

use crate::error::ChatbotResult;

/// Text embedding plus grounded chat completion from one model vendor
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> ChatbotResult<Vec<f32>>;

    /// Answer `query` using only `context`
    async fn complete(&self, query: &str, context: &str) -> ChatbotResult<String>;
}
