//! Provider traits. Both are object-safe so the curator can hold them as
//! `Arc<dyn ...>` and share them across per-day tasks.

use async_trait::async_trait;

use super::types::{ProviderError, SearchHit};

/// A text-generation model.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short identifier used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one prompt and return the model's raw text.
    ///
    /// Exactly one attempt is made; there is no retry at this layer.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// A web search API returning organic results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run one query, asking for at most `count` results.
    ///
    /// Returns [`ProviderError::Unconfigured`] when no credential is set;
    /// callers decide whether that is fatal.
    async fn query(&self, term: &str, count: usize) -> Result<Vec<SearchHit>, ProviderError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn GenerationProvider, _: &dyn SearchProvider) {}
};
