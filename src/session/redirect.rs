use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::info;

use crate::bridge::{FrameContext, HostBridge};
use crate::error::SessionError;
use crate::models::AppHandle;

/// How a redirect was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectKind {
    /// The app was the top-level context and navigated itself.
    TopLevel,
    /// The app was embedded; the host bridge told the parent frame to navigate.
    Remote,
}

/// Sends the browser to an authorization URL from wherever the app is running.
///
/// An embedded iframe navigating itself would only move the iframe, so in
/// that case the redirect has to go through the host bridge. The bridge call
/// is bounded by `timeout`.
pub struct RedirectDispatcher {
    frame: Arc<dyn FrameContext>,
    bridge: Arc<dyn HostBridge>,
    app: AppHandle,
    timeout: Duration,
}

impl RedirectDispatcher {
    pub fn new(
        frame: Arc<dyn FrameContext>,
        bridge: Arc<dyn HostBridge>,
        app: AppHandle,
        timeout: Duration,
    ) -> Self {
        Self {
            frame,
            bridge,
            app,
            timeout,
        }
    }

    pub async fn redirect_to(&self, url: &str) -> Result<RedirectKind, SessionError> {
        if self.frame.is_top_level() {
            info!(
                event_name = "redirect.dispatch",
                event_domain = "redirect",
                kind = "top_level",
                "redirecting top-level context"
            );
            self.frame
                .navigate(url)
                .map_err(|e| SessionError::Transport(format!("navigation failed: {}", e)))?;
            Ok(RedirectKind::TopLevel)
        } else {
            info!(
                event_name = "redirect.dispatch",
                event_domain = "redirect",
                kind = "remote",
                bridge = self.bridge.get_name(),
                "redirecting parent frame through host bridge"
            );
            match timeout(self.timeout, self.bridge.redirect_remote(&self.app, url)).await {
                Ok(Ok(())) => Ok(RedirectKind::Remote),
                Ok(Err(e)) => Err(SessionError::Transport(format!(
                    "remote redirect failed: {}",
                    e
                ))),
                Err(_) => Err(SessionError::Transport(format!(
                    "remote redirect through '{}' timed out after {:?}",
                    self.bridge.get_name(),
                    self.timeout
                ))),
            }
        }
    }
}
