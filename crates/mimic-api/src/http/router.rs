//! Axum router configuration.
//!
//! Public routes: `/`, `/health`, `/qr`. Bridge webhooks live under
//! `/webhook/` and are guarded by [`WebhookAuth`](crate::http::extractors::auth::WebhookAuth).

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use mimic_core::history::ChatLogStore;
use mimic_core::llm::TextGenerator;
use mimic_core::transport::Transport;

use crate::http::handlers;
use crate::state::AppState;

pub fn build_router<S, G, T>(state: AppState<S, G, T>) -> Router
where
    S: ChatLogStore + 'static,
    G: TextGenerator + 'static,
    T: Transport + 'static,
{
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/qr", get(handlers::pairing::qr::<S, G, T>))
        .route(
            "/webhook/message",
            post(handlers::webhook::receive_message::<S, G, T>),
        )
        .route(
            "/webhook/pairing",
            post(handlers::pairing::pairing_code::<S, G, T>),
        )
        .route("/webhook/ready", post(handlers::pairing::ready::<S, G, T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use mimic_core::gate::MessageGate;
    use mimic_core::history::MemoryChatLogStore;
    use mimic_types::chat::SenderIdentity;
    use mimic_types::config::BotConfig;
    use mimic_types::error::TransportError;
    use mimic_types::llm::LlmError;

    struct CannedGenerator;

    impl TextGenerator for CannedGenerator {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok("hey!".to_string())
        }
    }

    struct SlowGenerator;

    impl TextGenerator for SlowGenerator {
        fn name(&self) -> &str {
            "slow"
        }

        fn model(&self) -> &str {
            "slow-1"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok("late but here".to_string())
        }
    }

    #[derive(Clone, Default)]
    struct SharedOutbox(Arc<Mutex<Vec<(SenderIdentity, String)>>>);

    impl Transport for SharedOutbox {
        async fn send_text(&self, to: &SenderIdentity, text: &str) -> Result<(), TransportError> {
            self.0.lock().unwrap().push((to.clone(), text.to_string()));
            Ok(())
        }
    }

    type TestState = AppState<MemoryChatLogStore, CannedGenerator, SharedOutbox>;

    fn test_state(token: Option<&str>) -> (TestState, SharedOutbox) {
        let mut config = BotConfig::default();
        config.allow_list.insert("A".into());
        let outbox = SharedOutbox::default();
        let gate = MessageGate::new(
            MemoryChatLogStore::new(),
            CannedGenerator,
            outbox.clone(),
            &config,
        );
        (AppState::new(gate, token.map(str::to_string)), outbox)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, json: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(json.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Stop accepting background work and wait for what is in flight.
    async fn drain(state: &TestState) {
        state.tasks.close();
        state.tasks.wait().await;
    }

    #[tokio::test]
    async fn test_root_liveness() {
        let (state, _) = test_state(None);
        let response = build_router(state).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Bot running");
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let (state, _) = test_state(None);
        let response = build_router(state).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_qr_follows_pairing_lifecycle() {
        let (state, _) = test_state(None);
        let app = build_router(state.clone());

        let response = app.clone().oneshot(get("/qr")).await.unwrap();
        assert_eq!(body_text(response).await, "QR not generated yet.");

        let response = app
            .clone()
            .oneshot(post_json("/webhook/pairing", r#"{"code":"2@abc,def"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.clone().oneshot(get("/qr")).await.unwrap();
        let page = body_text(response).await;
        assert!(page.contains("<h2>Scan this QR to connect WhatsApp</h2>"));
        assert!(page.contains("<svg"));

        let response = app
            .clone()
            .oneshot(post_json("/webhook/ready", "", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get("/qr")).await.unwrap();
        assert_eq!(body_text(response).await, "Device already linked.");
    }

    #[tokio::test]
    async fn test_message_webhook_runs_gate_in_background() {
        let (state, outbox) = test_state(None);
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_json("/webhook/message", r#"{"from":"A","body":"hi"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        drain(&state).await;
        let sent = outbox.0.lock().unwrap().clone();
        assert_eq!(sent, vec![(SenderIdentity::from("A"), "hey!".to_string())]);
    }

    #[tokio::test]
    async fn test_in_flight_exchange_completes_when_tasks_drain() {
        let mut config = BotConfig::default();
        config.allow_list.insert("A".into());
        let outbox = SharedOutbox::default();
        let gate = MessageGate::new(
            MemoryChatLogStore::new(),
            SlowGenerator,
            outbox.clone(),
            &config,
        );
        let state = AppState::new(gate, None);

        let response = build_router(state.clone())
            .oneshot(post_json("/webhook/message", r#"{"from":"A","body":"hi"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        state.tasks.close();
        state.tasks.wait().await;

        assert_eq!(outbox.0.lock().unwrap().len(), 1);
        let log = state.gate.store().read(&"A".into()).await.unwrap().unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.ends_with("] Persona: late but here\n"));
    }

    #[tokio::test]
    async fn test_message_from_unlisted_sender_is_accepted_but_ignored() {
        let (state, outbox) = test_state(None);
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_json("/webhook/message", r#"{"from":"B","body":"hi"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        drain(&state).await;
        assert!(outbox.0.lock().unwrap().is_empty());
        assert!(!state.gate.store().contains(&"B".into()));
    }

    #[tokio::test]
    async fn test_message_with_empty_sender_is_rejected() {
        let (state, _) = test_state(None);
        let response = build_router(state)
            .oneshot(post_json("/webhook/message", r#"{"from":" ","body":"hi"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhooks_require_configured_token() {
        let (state, _) = test_state(Some("hook-secret"));
        let app = build_router(state);
        let message = r#"{"from":"A","body":"hi"}"#;

        let response = app
            .clone()
            .oneshot(post_json("/webhook/message", message, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_json("/webhook/message", message, Some("wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_json("/webhook/ready", "", Some("wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(post_json("/webhook/message", message, Some("hook-secret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_qr_is_public_even_with_token() {
        let (state, _) = test_state(Some("hook-secret"));
        let response = build_router(state).oneshot(get("/qr")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
