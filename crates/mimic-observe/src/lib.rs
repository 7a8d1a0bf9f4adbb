//! Observability for Mimic: subscriber setup and span export.

pub mod tracing_setup;
