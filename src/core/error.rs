//! Error types.

/// Errors surfaced by the engine.
///
/// Every variant is non-fatal: the engine logs it, leaves state untouched
/// and hands it to the caller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown status kind: {0}")]
    UnknownStatusKind(String),

    #[error("hook id already registered: {0}")]
    DuplicateHookId(String),

    #[error("hook not registered: {0}")]
    HookNotFound(String),

    #[error("unknown relic: {0}")]
    UnknownRelic(String),

    #[error("unknown run modifier: {0}")]
    UnknownModifier(String),

    #[error("already active: {0}")]
    AlreadyActive(String),

    #[error("{origin} failed: {reason}")]
    HookHandlerFailure { origin: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save store error: {0}")]
    Store(String),
}

/// Failure reported by an extension callback (hook handler, status tick).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    /// Create a handler error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
