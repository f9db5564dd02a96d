use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::bridge::HostBridge;
use crate::error::SessionError;
use crate::models::{AppHandle, SessionToken};

/// Obtains signed session tokens from the host bridge.
#[derive(Clone)]
pub struct TokenProvider {
    bridge: Arc<dyn HostBridge>,
    timeout: Duration,
}

impl TokenProvider {
    pub fn new(bridge: Arc<dyn HostBridge>, timeout: Duration) -> Self {
        Self { bridge, timeout }
    }

    /// Requests a fresh token. The bridge call is bounded by the configured
    /// timeout so a hung bridge cannot stall the caller.
    pub async fn request_token(&self, app: &AppHandle) -> Result<SessionToken, SessionError> {
        let name = self.bridge.get_name();
        match timeout(self.timeout, self.bridge.request_token(app)).await {
            Ok(Ok(token)) => {
                debug!("Bridge '{}' issued a session token", name);
                Ok(token)
            }
            Ok(Err(e)) => Err(SessionError::Transport(format!(
                "bridge '{}' failed to issue a token: {}",
                name, e
            ))),
            Err(_) => Err(SessionError::Transport(format!(
                "bridge '{}' timed out after {:?}",
                name, self.timeout
            ))),
        }
    }
}
