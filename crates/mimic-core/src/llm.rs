//! TextGenerator trait definition.
//!
//! The single-shot text-generation boundary. Implementations live in
//! mimic-infra (e.g. `GeminiProvider`).

use mimic_types::llm::LlmError;

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait TextGenerator: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier the provider sends requests to.
    fn model(&self) -> &str;

    /// Send one prompt and return the first candidate's raw text.
    ///
    /// Returns `LlmError::EmptyResponse` when the response carries no text.
    /// No retries are performed.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
