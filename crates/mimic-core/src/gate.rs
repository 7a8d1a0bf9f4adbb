//! Inbound message gate.
//!
//! Runs the linear pipeline for every inbound message:
//! allow-list check -> append inbound -> window history -> generate reply ->
//! send reply -> append outbound.
//!
//! Messages from identities outside the allow-list are dropped silently. When
//! `serialize_per_sender` is enabled, the pipeline for one identity runs under
//! a per-identity lock so that overlapping messages cannot interleave their
//! log appends.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use mimic_types::chat::{SenderIdentity, SenderLabel};
use mimic_types::config::{BotConfig, WindowConfig};
use mimic_types::error::GateError;
use mimic_types::llm::ReplyOutcome;

use crate::history::store::ChatLogStore;
use crate::history::window::window;
use crate::llm::TextGenerator;
use crate::reply::ReplyGenerator;
use crate::transport::Transport;

/// Fixed set of identities the bot answers.
#[derive(Debug, Clone, Default)]
pub struct AllowList(BTreeSet<SenderIdentity>);

impl AllowList {
    pub fn new(identities: impl IntoIterator<Item = SenderIdentity>) -> Self {
        Self(identities.into_iter().collect())
    }

    pub fn contains(&self, identity: &SenderIdentity) -> bool {
        self.0.contains(identity)
    }
}

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Sender not on the allow-list; nothing was logged or sent.
    Filtered,
    /// A reply (generated or fallback) was sent and logged.
    Replied { reply: ReplyOutcome },
}

pub struct MessageGate<S, G, T>
where
    S: ChatLogStore,
    G: TextGenerator,
    T: Transport,
{
    store: S,
    replies: ReplyGenerator<G>,
    transport: T,
    allow_list: AllowList,
    window: WindowConfig,
    sender_locks: Option<DashMap<SenderIdentity, Arc<Mutex<()>>>>,
}

impl<S, G, T> MessageGate<S, G, T>
where
    S: ChatLogStore,
    G: TextGenerator,
    T: Transport,
{
    /// Wire a gate from its collaborators and the bot configuration.
    pub fn new(store: S, generator: G, transport: T, config: &BotConfig) -> Self {
        let sender_locks = config.gate.serialize_per_sender.then(DashMap::new);
        Self {
            store,
            replies: ReplyGenerator::new(generator, config.persona.clone(), &config.generation),
            transport,
            allow_list: AllowList::new(config.allow_list.iter().cloned()),
            window: config.window,
            sender_locks,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Windowed history for `identity`, as the next prompt would see it.
    pub async fn history(&self, identity: &SenderIdentity) -> Result<String, GateError> {
        Ok(window(&self.store, identity, &self.window).await?)
    }

    /// Process one inbound message.
    ///
    /// Storage and transport failures abort the exchange. If the send fails
    /// the reply is not logged.
    pub async fn handle(
        &self,
        from: &SenderIdentity,
        body: &str,
    ) -> Result<GateOutcome, GateError> {
        if !self.allow_list.contains(from) {
            tracing::trace!(identity = %from, "sender not on allow-list, ignoring");
            return Ok(GateOutcome::Filtered);
        }

        let _guard = match &self.sender_locks {
            Some(locks) => {
                let lock = locks.entry(from.clone()).or_default().clone();
                Some(lock.lock_owned().await)
            }
            None => None,
        };

        let persona = self.replies.persona();
        self.store
            .append(from, persona.label(SenderLabel::Owner), body)
            .await?;

        let history = self.history(from).await?;
        let reply = self.replies.generate(body, &history).await;
        if reply.is_degraded() {
            tracing::warn!(identity = %from, outcome = ?reply, "sending fallback reply");
        }

        self.transport.send_text(from, reply.text()).await?;

        self.store
            .append(from, persona.label(SenderLabel::Persona), reply.text())
            .await?;

        tracing::info!(
            identity = %from,
            history_bytes = history.len(),
            "reply sent"
        );

        Ok(GateOutcome::Replied { reply })
    }
}
