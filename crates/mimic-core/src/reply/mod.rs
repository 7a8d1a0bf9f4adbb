//! Persona-conditioned reply generation.

pub mod generator;
pub mod prompt;

pub use generator::ReplyGenerator;
pub use prompt::build_persona_prompt;
