//! Outbound messaging transports.

pub mod http_bridge;

pub use http_bridge::HttpBridgeTransport;
