//! Infrastructure layer for Mimic.
//!
//! Implements the ports defined in `mimic-core`: the on-disk chat log store,
//! the Gemini text generator and the HTTP messaging bridge. Also owns
//! configuration loading from the data directory and the environment.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod transport;
