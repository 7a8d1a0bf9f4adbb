//! Device pairing status exposed on the `/qr` endpoint.

use serde::{Deserialize, Serialize};

/// Where the messaging bridge is in its linking lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "code", rename_all = "snake_case")]
pub enum PairingStatus {
    /// No pairing code has been issued yet.
    #[default]
    Unset,
    /// A pairing code is waiting to be scanned. Newer codes replace older ones.
    Pending(String),
    /// The bridge reported the device as linked and ready.
    Linked,
}
