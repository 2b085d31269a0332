//! Error types for the remote game service and client configuration.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while talking to the remote game service.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ServiceErrorKind {
    /// The request never produced a response (connect, timeout, body read).
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The service answered with a non-success HTTP status.
    #[display("Service returned status {}", _0)]
    Status(u16),
    /// The state payload could not be decoded into a board snapshot.
    #[display("Malformed state payload: {}", _0)]
    MalformedState(String),
}

/// Remote service error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Service error: {} at {}:{}", kind, file, line)]
pub struct ServiceError {
    /// Error category.
    pub kind: ServiceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ServiceError {
    /// Creates a new service error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::new(ServiceErrorKind::Status(status.as_u16())),
            None => Self::new(ServiceErrorKind::Transport(err.to_string())),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ServiceErrorKind::MalformedState(err.to_string()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
