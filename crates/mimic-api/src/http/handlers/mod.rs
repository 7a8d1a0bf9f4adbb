//! Route handlers.

pub mod health;
pub mod pairing;
pub mod webhook;
