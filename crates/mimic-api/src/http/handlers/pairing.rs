//! Device pairing: the `/qr` page and the bridge's pairing webhooks.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use qrcode::QrCode;
use qrcode::render::svg;
use serde::Deserialize;

use mimic_core::history::ChatLogStore;
use mimic_core::llm::TextGenerator;
use mimic_core::transport::Transport;
use mimic_types::pairing::PairingStatus;

use crate::http::error::AppError;
use crate::http::extractors::auth::WebhookAuth;
use crate::state::AppState;

pub const NOT_GENERATED: &str = "QR not generated yet.";
pub const ALREADY_LINKED: &str = "Device already linked.";

#[derive(Debug, Deserialize)]
pub struct PairingCode {
    pub code: String,
}

/// GET /qr - current pairing code as a scannable QR.
pub async fn qr<S, G, T>(State(state): State<AppState<S, G, T>>) -> Result<Response, AppError>
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    match state.pairing.current().await {
        PairingStatus::Unset => Ok(NOT_GENERATED.into_response()),
        PairingStatus::Linked => Ok(ALREADY_LINKED.into_response()),
        PairingStatus::Pending(code) => Ok(Html(qr_page(&code)?).into_response()),
    }
}

/// Inline-SVG page for `code`.
pub fn qr_page(code: &str) -> Result<String, AppError> {
    let qr = QrCode::new(code.as_bytes())
        .map_err(|e| AppError::Internal(format!("failed to encode pairing code: {e}")))?;
    let image = qr
        .render()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(format!(
        "<!DOCTYPE html>\n<html><body>\n<h2>Scan this QR to connect WhatsApp</h2>\n{image}\n</body></html>\n"
    ))
}

/// POST /webhook/pairing - the bridge issued a (new) pairing code.
pub async fn pairing_code<S, G, T>(
    State(state): State<AppState<S, G, T>>,
    _auth: WebhookAuth,
    Json(payload): Json<PairingCode>,
) -> Result<StatusCode, AppError>
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    if payload.code.trim().is_empty() {
        return Err(AppError::Validation("'code' must not be empty".to_string()));
    }
    state.pairing.issue(payload.code).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /webhook/ready - the bridge finished linking.
pub async fn ready<S, G, T>(
    State(state): State<AppState<S, G, T>>,
    _auth: WebhookAuth,
) -> StatusCode
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    state.pairing.mark_linked().await;
    StatusCode::NO_CONTENT
}
