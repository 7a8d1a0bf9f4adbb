//! Inbound message webhook.
//!
//! Answers immediately and runs the message gate in a background task, so a
//! slow generation call never holds the bridge's request open. Tasks are
//! tracked in [`AppState::tasks`] and drained before the process exits.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use mimic_core::gate::GateOutcome;
use mimic_core::history::ChatLogStore;
use mimic_core::llm::TextGenerator;
use mimic_core::transport::Transport;
use mimic_types::chat::SenderIdentity;

use crate::http::error::AppError;
use crate::http::extractors::auth::WebhookAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub from: String,
    pub body: String,
}

/// POST /webhook/message - one inbound chat message from the bridge.
pub async fn receive_message<S, G, T>(
    State(state): State<AppState<S, G, T>>,
    _auth: WebhookAuth,
    Json(message): Json<InboundMessage>,
) -> Result<StatusCode, AppError>
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    if message.from.trim().is_empty() {
        return Err(AppError::Validation("'from' must not be empty".to_string()));
    }

    let from = SenderIdentity::new(message.from);
    let body = message.body;
    let gate = Arc::clone(&state.gate);

    state.tasks.spawn(async move {
        match gate.handle(&from, &body).await {
            Ok(GateOutcome::Filtered) => {}
            Ok(GateOutcome::Replied { reply }) => {
                tracing::debug!(
                    identity = %from,
                    degraded = reply.is_degraded(),
                    "exchange complete"
                );
            }
            Err(e) => {
                tracing::error!(identity = %from, error = %e, "message handling failed");
            }
        }
    });

    Ok(StatusCode::ACCEPTED)
}
