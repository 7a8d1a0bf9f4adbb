//! Process-scoped pairing state.
//!
//! Holds the latest device-linking code handed over by the messaging bridge.
//! Starts `Unset`, moves to `Pending(code)` on every issued code, and to
//! `Linked` once the bridge reports it is ready.

use std::sync::Arc;

use tokio::sync::RwLock;

use mimic_types::pairing::PairingStatus;

/// Shared handle to the pairing status. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct PairingState {
    inner: Arc<RwLock<PairingStatus>>,
}

impl PairingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current status.
    pub async fn current(&self) -> PairingStatus {
        self.inner.read().await.clone()
    }

    /// Record a freshly issued pairing code, replacing any previous one.
    pub async fn issue(&self, code: impl Into<String>) {
        *self.inner.write().await = PairingStatus::Pending(code.into());
        tracing::info!("pairing code generated");
    }

    /// The bridge finished linking; the pairing code is no longer needed.
    pub async fn mark_linked(&self) {
        *self.inner.write().await = PairingStatus::Linked;
        tracing::info!("messaging client ready");
    }
}
