use thiserror::Error;

/// Errors from chat log storage.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("identity '{0}' cannot be used as a log file name")]
    InvalidIdentity(String),

    #[error("filesystem error: {0}")]
    FileSystem(String),
}

/// Errors from the messaging transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport not configured: {0}")]
    NotConfigured(String),

    #[error("send failed: {0}")]
    Send(String),

    #[error("send rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors that abort a single message exchange.
///
/// Generation failures never show up here; they degrade to a fallback reply.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Log(#[from] LogError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
