//! Google Gemini `generateContent` provider.
//!
//! Implements [`TextGenerator`](mimic_core::llm::TextGenerator) with a single
//! non-streaming request per prompt.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
