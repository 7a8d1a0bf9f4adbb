//! Configuration types for Mimic.
//!
//! `BotConfig` represents the `config.toml` in the data directory. Every field
//! has a default, so an empty or missing file yields a working (if allow-list
//! empty, and therefore silent) bot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::chat::{SenderIdentity, SenderLabel};

/// Top-level configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Sender identities the bot is allowed to answer. Fixed for the process lifetime.
    #[serde(default)]
    pub allow_list: BTreeSet<SenderIdentity>,

    #[serde(default)]
    pub persona: PersonaConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            allow_list: BTreeSet::new(),
            persona: PersonaConfig::default(),
            window: WindowConfig::default(),
            generation: GenerationConfig::default(),
            gate: GateConfig::default(),
            storage: StorageConfig::default(),
            bridge: BridgeConfig::default(),
        }
    }
}

/// Who the bot pretends to be, and how the human side is labelled in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Persona name. Also used as the log label for outbound replies.
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Log label for inbound messages.
    #[serde(default = "default_owner_label")]
    pub owner_label: String,

    /// Extra style guidance injected into the prompt's goal list.
    #[serde(default = "default_persona_style")]
    pub style: String,
}

fn default_persona_name() -> String {
    "Persona".to_string()
}

fn default_owner_label() -> String {
    "User".to_string()
}

fn default_persona_style() -> String {
    "Use the same tone, slang, and mix of languages that appear in the chat history.".to_string()
}

impl PersonaConfig {
    /// Text written to the log for `label`.
    pub fn label(&self, label: SenderLabel) -> &str {
        match label {
            SenderLabel::Owner => &self.owner_label,
            SenderLabel::Persona => &self.name,
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            owner_label: default_owner_label(),
            style: default_persona_style(),
        }
    }
}

/// Bounds applied when re-reading a chat log into prompt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Only the trailing `max_bytes` of the (trimmed) log are considered.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Dated lines older than this many calendar months are dropped.
    #[serde(default = "default_max_age_months")]
    pub max_age_months: u32,

    /// At most this many lines survive, counted from the end.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_max_bytes() -> usize {
    200 * 1024
}

fn default_max_age_months() -> u32 {
    3
}

fn default_max_lines() -> usize {
    400
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            max_age_months: default_max_age_months(),
            max_lines: default_max_lines(),
        }
    }
}

/// External text-generation settings. The API key is not part of the file;
/// it comes from the `GEMINI_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Reply used when the service answers without any candidate text.
    #[serde(default = "default_empty_fallback")]
    pub empty_fallback: String,

    /// Reply used when the call itself fails.
    #[serde(default = "default_failure_fallback")]
    pub failure_fallback: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_empty_fallback() -> String {
    "Hmm...".to_string()
}

fn default_failure_fallback() -> String {
    "Error generating reply.".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            empty_fallback: default_empty_fallback(),
            failure_fallback: default_failure_fallback(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Serialize exchanges per sender so that two quick messages from the same
    /// identity cannot interleave their log appends.
    #[serde(default = "default_true")]
    pub serialize_per_sender: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            serialize_per_sender: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory (relative to the data dir unless absolute) holding one
    /// `{identity}.txt` per sender.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_log_dir() -> String {
    "mychat".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

/// Connection to the external messaging bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// URL the bridge accepts outbound messages on (`POST {"to","body"}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_url: Option<String>,

    /// Bearer token attached to outbound sends.
    #[serde(default, skip_serializing)]
    pub send_token: Option<String>,

    /// Bearer token required on inbound webhooks. Unset means no auth.
    #[serde(default, skip_serializing)]
    pub webhook_token: Option<String>,
}
