//! GeminiProvider -- [`TextGenerator`] for the Gemini `generateContent` API.
//!
//! The API key travels as the `key` query parameter. It is held in a
//! [`SecretString`] and stripped from any request error before logging.

use secrecy::{ExposeSecret, SecretString};

use mimic_core::llm::TextGenerator;
use mimic_types::llm::LlmError;

use super::types::{GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// No request timeout is configured; a hung call holds only its own task.
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Extract the reply text from a raw response body.
///
/// Unparseable JSON is a deserialization error. Well-formed JSON with no
/// candidate text (missing fields, blocked prompt, blank string) is
/// [`LlmError::EmptyResponse`].
pub fn parse_response(body: &str) -> Result<String, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

    match response.first_text() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => {
            tracing::debug!(
                finish_reason = response.finish_reason().unwrap_or("none"),
                "gemini response carried no text"
            );
            Err(LlmError::EmptyResponse)
        }
    }
}

impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| LlmError::Provider {
            message: format!("failed to read response body: {}", e.without_url()),
        })?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }
}
