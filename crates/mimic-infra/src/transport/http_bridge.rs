//! HttpBridgeTransport -- sends replies through an external messaging bridge.
//!
//! The bridge owns the messaging session (device linking, reconnects). Mimic
//! only POSTs `{"to": identity, "body": text}` to its send endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use mimic_core::transport::Transport;
use mimic_types::chat::SenderIdentity;
use mimic_types::config::BridgeConfig;
use mimic_types::error::TransportError;

#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    to: &'a str,
    body: &'a str,
}

pub struct HttpBridgeTransport {
    client: reqwest::Client,
    send_url: Option<String>,
    token: Option<SecretString>,
}

impl HttpBridgeTransport {
    pub fn new(send_url: Option<String>, token: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            send_url,
            token,
        }
    }

    pub fn from_config(bridge: &BridgeConfig) -> Self {
        Self::new(
            bridge.send_url.clone(),
            bridge.send_token.clone().map(SecretString::from),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.send_url.is_some()
    }
}

impl Transport for HttpBridgeTransport {
    async fn send_text(&self, to: &SenderIdentity, text: &str) -> Result<(), TransportError> {
        let Some(url) = self.send_url.as_deref() else {
            return Err(TransportError::NotConfigured(
                "bridge.send_url is not set".to_string(),
            ));
        };

        let payload = SendPayload {
            to: to.as_str(),
            body: text,
        };

        let mut request = self.client.post(url).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(identity = %to, bytes = text.len(), "reply handed to bridge");
        Ok(())
    }
}
