//! Relay error model.

use thiserror::Error;

/// Result type used across the relay.
pub type RelayResult<T> = Result<T, RelayError>;

/// Relay-level error.
///
/// Variants carry rendered messages rather than source errors so the same value
/// can be logged, counted in a dispatch report and handed to the invocation
/// context without lifetime or `Clone` trouble from SDK error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Connecting to or querying the inventory database failed.
    #[error("database error: {0}")]
    Database(String),

    /// A single queue send failed.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Publishing the completion notification failed.
    #[error("notify error: {0}")]
    Notify(String),

    /// The database connection reported an error after the query had already
    /// returned (observed while releasing the handle).
    #[error("connection error: {0}")]
    Connection(String),

    /// Required configuration was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A record could not be encoded as a message body.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RelayError {
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::Dispatch(msg.into())
    }

    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error ends an invocation when it reaches the handler.
    ///
    /// Dispatch and serialization failures are absorbed per record; a
    /// post-query connection error never retracts results.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Notify(_) | Self::Config(_))
    }
}
