use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;

/// Key some backend versions wrap the auth-check payload in.
pub const AUTH_CHECK_WRAPPER: &str = "AuthCheckResponse";

/// Answer of the backend's embedded auth check.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub authenticated: bool,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub scopes: Option<String>,
}

impl AuthResult {
    /// Parses the auth-check body, accepting the payload either at the top
    /// level or nested under [`AUTH_CHECK_WRAPPER`]. Nothing else is guessed.
    pub fn from_body(body: &str) -> Result<Self, SessionError> {
        let raw: Value = serde_json::from_str(body)
            .map_err(|e| SessionError::Protocol(format!("auth check body is not JSON: {}", e)))?;

        let payload = match raw.get(AUTH_CHECK_WRAPPER) {
            Some(inner) => inner.clone(),
            None => raw,
        };

        if !payload.is_object() {
            return Err(SessionError::Protocol(format!(
                "auth check payload is not an object: {}",
                payload
            )));
        }

        serde_json::from_value(payload)
            .map_err(|e| SessionError::Protocol(format!("unexpected auth check payload: {}", e)))
    }
}
