//! HTTP surface: liveness, pairing QR page, and bridge webhooks.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
