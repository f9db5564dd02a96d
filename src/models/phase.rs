use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SessionError};

/// Where the session lifecycle currently stands.
///
/// `Checking` is the entry phase; the other three are terminal for a page load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Checking,
    Authenticated {
        shop_name: Option<String>,
    },
    Unauthenticated {
        authorization_url: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionPhase::Checking)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Checking => "checking",
            SessionPhase::Authenticated { .. } => "authenticated",
            SessionPhase::Unauthenticated { .. } => "unauthenticated",
            SessionPhase::Error { .. } => "error",
        }
    }
}

impl From<&SessionError> for SessionPhase {
    fn from(e: &SessionError) -> Self {
        SessionPhase::Error {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}
