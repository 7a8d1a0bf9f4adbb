//! Per-sender chat logs and the bounded view of them fed back into prompts.

pub mod store;
pub mod window;

pub use store::{ChatLogStore, MemoryChatLogStore};
pub use window::{window, window_text};
