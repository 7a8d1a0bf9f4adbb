//! ReplyGenerator -- one best-effort generation call per inbound message.
//!
//! Never fails: provider errors and empty responses degrade to configured
//! fallback text, reported through [`ReplyOutcome::Degraded`].

use tracing::{Instrument, info_span};

use mimic_types::config::{GenerationConfig, PersonaConfig};
use mimic_types::llm::{DegradedReason, LlmError, ReplyOutcome};

use super::prompt::build_persona_prompt;
use crate::llm::TextGenerator;

pub struct ReplyGenerator<G: TextGenerator> {
    generator: G,
    persona: PersonaConfig,
    empty_fallback: String,
    failure_fallback: String,
}

impl<G: TextGenerator> ReplyGenerator<G> {
    pub fn new(generator: G, persona: PersonaConfig, generation: &GenerationConfig) -> Self {
        Self {
            generator,
            persona,
            empty_fallback: generation.empty_fallback.clone(),
            failure_fallback: generation.failure_fallback.clone(),
        }
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate the persona's reply to `latest_message` given `history`.
    pub async fn generate(&self, latest_message: &str, history: &str) -> ReplyOutcome {
        let prompt = build_persona_prompt(&self.persona, history, latest_message);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.generator.name(),
            gen_ai.request.model = %self.generator.model(),
            gen_ai.agent.name = %self.persona.name,
        );

        let result = self.generator.generate(&prompt).instrument(span).await;

        match result {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!("generator returned blank text, using fallback");
                    self.degraded_empty()
                } else {
                    ReplyOutcome::Generated {
                        text: text.to_string(),
                    }
                }
            }
            Err(LlmError::EmptyResponse) => {
                tracing::warn!("generator response had no candidate text, using fallback");
                self.degraded_empty()
            }
            Err(e) => {
                tracing::error!(
                    provider = self.generator.name(),
                    error = %e,
                    "text generation failed"
                );
                ReplyOutcome::Degraded {
                    text: self.failure_fallback.clone(),
                    reason: DegradedReason::ProviderFailure(e.to_string()),
                }
            }
        }
    }

    fn degraded_empty(&self) -> ReplyOutcome {
        ReplyOutcome::Degraded {
            text: self.empty_fallback.clone(),
            reason: DegradedReason::EmptyResponse,
        }
    }
}
