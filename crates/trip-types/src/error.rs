use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TripError {
    /// Malformed wizard input; the transition is blocked.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model error: {0}")]
    Model(String),

    /// Model output that is not valid JSON. `raw` keeps the offending text.
    #[error("Invalid model output: {message}")]
    Parse { message: String, raw: String },

    /// Valid JSON missing a required top-level key.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification used by callers to decide how a failure surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Model,
    Parse,
    Schema,
    Collaborator,
    Internal,
}

impl TripError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::Validation(_) => ErrorKind::Validation,
            TripError::Model(_)
            | TripError::Network(_)
            | TripError::Timeout(_)
            | TripError::Config(_) => ErrorKind::Model,
            TripError::Parse { .. } => ErrorKind::Parse,
            TripError::Schema(_) | TripError::Normalization(_) => ErrorKind::Schema,
            TripError::Collaborator(_) => ErrorKind::Collaborator,
            TripError::Storage(_)
            | TripError::Serialization(_)
            | TripError::JsInterop(_)
            | TripError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Raw model text attached to a parse failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            TripError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TripError {
    fn from(e: serde_json::Error) -> Self {
        TripError::Serialization(e.to_string())
    }
}
