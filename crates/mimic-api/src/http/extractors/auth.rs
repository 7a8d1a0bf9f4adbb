//! Webhook authentication extractor.
//!
//! When `bridge.webhook_token` is configured every webhook must carry
//! `Authorization: Bearer <token>`. Without a token, webhooks are open.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::ExposeSecret;

use mimic_core::history::ChatLogStore;
use mimic_core::llm::TextGenerator;
use mimic_core::transport::Transport;

use crate::http::error::AppError;
use crate::state::AppState;

/// Marker for a request that passed the webhook token check.
pub struct WebhookAuth;

impl<S, G, T> FromRequestParts<AppState<S, G, T>> for WebhookAuth
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, G, T>,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &state.webhook_token else {
            return Ok(WebhookAuth);
        };

        let provided = bearer_token(parts)?;
        if provided == expected.expose_secret() {
            Ok(WebhookAuth)
        } else {
            Err(AppError::Unauthorized("Invalid webhook token.".to_string()))
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts.headers.get("authorization").ok_or_else(|| {
        AppError::Unauthorized(
            "Missing webhook token. Provide it via 'Authorization: Bearer <token>'.".to_string(),
        )
    })?;
    let value = header.to_str().map_err(|_| {
        AppError::Unauthorized("Invalid Authorization header encoding".to_string())
    })?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization must use the Bearer scheme".to_string())
        })
}
