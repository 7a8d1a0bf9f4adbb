//! Business logic and port definitions for Mimic.
//!
//! This crate defines the "ports" (log store, text generator, transport) that
//! the infrastructure layer implements, plus the logic that runs between them:
//! history windowing, persona prompting and the inbound message gate. It
//! depends only on `mimic-types` -- never on `mimic-infra` or any IO crate.

pub mod gate;
pub mod history;
pub mod llm;
pub mod pairing;
pub mod reply;
pub mod transport;
