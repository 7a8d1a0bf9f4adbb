//! Text generation providers.

pub mod gemini;
