//! Transport trait for delivering replies back to a sender.

use mimic_types::chat::SenderIdentity;
use mimic_types::error::TransportError;

/// Outbound side of the messaging bridge.
pub trait Transport: Send + Sync {
    fn send_text(
        &self,
        to: &SenderIdentity,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
