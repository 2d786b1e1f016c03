//! Client for the external AI provider that synthesizes prompts.
//!
//! The provider is the pipeline's single suspension point and is treated as
//! untrusted: its output goes through defensive parsing in [`parse`] before
//! anything downstream sees it. [`PromptProvider`] is the seam the api
//! crate depends on; [`client::HttpPromptProvider`] is the production
//! implementation, and tests substitute stubs.

pub mod client;
pub mod parse;
pub mod template;

pub use client::{HttpPromptProvider, ProviderConfig};

use async_trait::async_trait;
use promptforge_core::structured::StructuredGuess;

/// Result of one provider invocation.
#[derive(Debug, Default)]
pub struct ProviderCompletion {
    /// The synthesized professional prompt text.
    pub prompt_text: String,
    /// Best-effort structured decomposition; defensively parsed, all fields
    /// optional.
    pub structured: StructuredGuess,
    /// Total tokens consumed upstream, when reported.
    pub tokens_used: Option<i64>,
}

/// Errors from the provider boundary. All of them surface as
/// `UPSTREAM_ERROR` at the API edge; timeout is treated exactly like
/// failure for quota compensation purposes.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The call exceeded its bounded timeout.
    #[error("Provider call timed out")]
    Timeout,

    /// Transport-level failure before a response arrived.
    #[error("Provider connection error: {0}")]
    Connection(String),

    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned status {0}")]
    Status(u16),

    /// The response arrived but could not be interpreted.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// The external AI model that turns a free-text idea into a professional
/// prompt decomposed into the 8-element framework.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    async fn invoke(
        &self,
        idea: &str,
        model: &str,
        style: &str,
    ) -> Result<ProviderCompletion, ProviderError>;
}
