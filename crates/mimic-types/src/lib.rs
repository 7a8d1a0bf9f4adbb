//! Shared domain types for Mimic.
//!
//! This crate contains the core domain types used across the Mimic workspace:
//! sender identities, chat log entries, configuration, generation outcomes,
//! pairing status, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod pairing;
