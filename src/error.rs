//! Error taxonomy for the session lifecycle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong while establishing or maintaining a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Required configuration (API key, tenant identifier, backend origin) is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Non-success HTTP status, network failure, or a failed host bridge call.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a JSON shape we do not understand.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Configuration(_) => ErrorKind::Configuration,
            SessionError::Transport(_) => ErrorKind::Transport,
            SessionError::Protocol(_) => ErrorKind::Protocol,
        }
    }
}

/// Serializable discriminant of [`SessionError`], carried by the `error` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Transport,
    Protocol,
}

impl From<reqwest::Error> for SessionError {
    fn from(e: reqwest::Error) -> Self {
        SessionError::Transport(e.to_string())
    }
}
