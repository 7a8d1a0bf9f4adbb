//! Application state shared by every HTTP handler.
//!
//! The gate is generic over its ports; the server pins it to the infra
//! implementations through the default type parameters.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;
use tokio_util::task::TaskTracker;

use mimic_core::gate::MessageGate;
use mimic_core::history::ChatLogStore;
use mimic_core::llm::TextGenerator;
use mimic_core::pairing::PairingState;
use mimic_core::transport::Transport;
use mimic_infra::config::api_key_from_env;
use mimic_infra::filesystem::LocalChatLogStore;
use mimic_infra::llm::gemini::GeminiProvider;
use mimic_infra::transport::HttpBridgeTransport;
use mimic_types::config::BotConfig;

pub type ConcreteGate = MessageGate<LocalChatLogStore, GeminiProvider, HttpBridgeTransport>;

pub struct AppState<S = LocalChatLogStore, G = GeminiProvider, T = HttpBridgeTransport>
where
    S: ChatLogStore,
    G: TextGenerator,
    T: Transport,
{
    pub gate: Arc<MessageGate<S, G, T>>,
    pub pairing: PairingState,
    pub webhook_token: Option<Arc<SecretString>>,
    /// Background message exchanges; drained on shutdown.
    pub tasks: TaskTracker,
}

impl<S, G, T> Clone for AppState<S, G, T>
where
    S: ChatLogStore,
    G: TextGenerator,
    T: Transport,
{
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            pairing: self.pairing.clone(),
            webhook_token: self.webhook_token.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

impl<S, G, T> AppState<S, G, T>
where
    S: ChatLogStore,
    G: TextGenerator,
    T: Transport,
{
    pub fn new(gate: MessageGate<S, G, T>, webhook_token: Option<String>) -> Self {
        Self {
            gate: Arc::new(gate),
            pairing: PairingState::default(),
            webhook_token: webhook_token.map(|t| Arc::new(SecretString::from(t))),
            tasks: TaskTracker::new(),
        }
    }
}

impl AppState {
    /// Wire the production gate: file logs, Gemini, HTTP bridge.
    pub fn init(data_dir: &Path, config: &BotConfig) -> anyhow::Result<Self> {
        let api_key = api_key_from_env()?;

        let store = LocalChatLogStore::from_config(data_dir, &config.storage);
        let generator = GeminiProvider::new(api_key, config.generation.model.clone())
            .with_base_url(config.generation.base_url.clone());
        let transport = HttpBridgeTransport::from_config(&config.bridge);

        if !transport.is_configured() {
            tracing::warn!("bridge.send_url is not set; replies cannot be delivered");
        }
        if config.bridge.webhook_token.is_none() {
            tracing::warn!("bridge.webhook_token is not set; webhooks are unauthenticated");
        }

        tracing::info!(
            log_dir = %store.log_dir().display(),
            model = %config.generation.model,
            allowed = config.allow_list.len(),
            "message gate ready"
        );

        let gate: ConcreteGate = MessageGate::new(store, generator, transport, config);
        Ok(Self::new(gate, config.bridge.webhook_token.clone()))
    }
}
