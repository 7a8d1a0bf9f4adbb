//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET / - plain liveness text.
pub async fn root() -> &'static str {
    "Bot running"
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
