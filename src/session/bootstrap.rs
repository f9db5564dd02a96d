use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::auth_checker::{AuthCheck, AuthChecker};
use super::context::SessionContext;
use super::redirect::RedirectDispatcher;
use super::refresh::{RefreshHandle, RefreshStats, TokenRefreshLoop};
use super::token_provider::TokenProvider;
use crate::backend::BackendClient;
use crate::bridge::{create_host_bridge, FrameContext, HostBridge};
use crate::config::{AppConfig, ConfigV1, SessionConfig};
use crate::error::SessionError;
use crate::models::{AppHandle, SessionPhase, SessionToken, TenantId};

/// Result of one page load.
///
/// Holds the refresh loop alive for as long as the value lives.
pub struct Session {
    id: Uuid,
    phase: SessionPhase,
    context: Option<SessionContext>,
    refresh: Option<RefreshHandle>,
    products: Option<Value>,
}

impl Session {
    fn terminal(id: Uuid, phase: SessionPhase, context: Option<SessionContext>) -> Self {
        Self {
            id,
            phase,
            context,
            refresh: None,
            products: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    /// The latest token published by the initial fetch or the refresh loop.
    pub fn current_token(&self) -> Option<SessionToken> {
        self.context.as_ref().and_then(|c| c.token.current())
    }

    /// The protected resource fetched right after authentication, if that succeeded.
    pub fn products(&self) -> Option<&Value> {
        self.products.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.as_ref().map_or(false, RefreshHandle::is_running)
    }

    /// Counters of the running refresh loop; `None` when no loop was started.
    pub fn refresh_stats(&self) -> Option<&RefreshStats> {
        self.refresh.as_ref().map(RefreshHandle::stats)
    }

    /// Tears the page down: stops the refresh loop if one is running.
    pub async fn shutdown(mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.stop().await;
        }
    }
}

/// The per-page-load state machine:
/// `checking → authenticated | unauthenticated | error`.
pub struct SessionBootstrap {
    app: AppConfig,
    session: SessionConfig,
    bridge: Arc<dyn HostBridge>,
    frame: Arc<dyn FrameContext>,
    phase: watch::Sender<SessionPhase>,
}

impl SessionBootstrap {
    pub fn new(
        app: AppConfig,
        session: SessionConfig,
        bridge: Arc<dyn HostBridge>,
        frame: Arc<dyn FrameContext>,
    ) -> Self {
        let (phase, _rx) = watch::channel(SessionPhase::Checking);
        Self {
            app,
            session,
            bridge,
            frame,
            phase,
        }
    }

    /// Builds a bootstrap whose host bridge comes from configuration.
    pub fn from_config(config: &ConfigV1, frame: Arc<dyn FrameContext>) -> Self {
        Self::new(
            config.app.clone(),
            config.session.clone(),
            create_host_bridge(&config.bridge),
            frame,
        )
    }

    /// The phase of the most recent (or in-flight) run.
    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Runs one page load to a terminal phase. Never fails: every error ends
    /// up in [`SessionPhase::Error`]. Calling it again is a fresh page load.
    pub async fn run(&self) -> Session {
        let id = Uuid::new_v4();
        self.publish(SessionPhase::Checking);

        let context = match self.build_context() {
            Ok(context) => context,
            Err(e) => return self.fail(id, None, e),
        };

        let shop = context.app.host().shop_domain().unwrap_or_default();
        info!(
            event_name = "session.bootstrap.checking",
            event_domain = "session",
            session_id = %id,
            shop = shop.as_str(),
            "checking embedded authentication"
        );

        let dispatcher = RedirectDispatcher::new(
            self.frame.clone(),
            self.bridge.clone(),
            context.app.clone(),
            self.session.timeout(),
        );
        let checker = AuthChecker::new(
            context.backend.clone(),
            context.app.clone(),
            &self.app.oauth_callback_path,
            dispatcher,
        );

        let result = match checker.check_auth().await {
            Ok(AuthCheck::Authenticated(result)) => result,
            Ok(AuthCheck::Unauthenticated {
                authorization_url, ..
            }) => {
                let phase = SessionPhase::Unauthenticated { authorization_url };
                self.publish(phase.clone());
                return Session::terminal(id, phase, Some(context));
            }
            Err(e) => return self.fail(id, Some(context), e),
        };

        let phase = SessionPhase::Authenticated {
            shop_name: result.shop_name,
        };
        self.publish(phase.clone());

        let provider = TokenProvider::new(self.bridge.clone(), self.session.timeout());
        let token = match provider.request_token(&context.app).await {
            Ok(token) => token,
            Err(e) => return self.fail(id, Some(context), e),
        };
        context.token.publish(token.clone());

        let refresh = TokenRefreshLoop::spawn(
            provider,
            context.app.clone(),
            context.token.clone(),
            self.session.refresh_interval(),
        );

        let products = match context.backend.product_list(&token).await {
            Ok(products) => Some(products),
            Err(e) => {
                warn!(session_id = %id, "product list fetch failed: {}", e);
                None
            }
        };

        Session {
            id,
            phase,
            context: Some(context),
            refresh: Some(refresh),
            products,
        }
    }

    fn build_context(&self) -> Result<SessionContext, SessionError> {
        let host = self.app.page_url.as_deref().and_then(TenantId::from_page_url);
        let app = AppHandle::from_config(&self.app, host)?;
        let origin = self.app.backend_origin.as_deref().ok_or_else(|| {
            SessionError::Configuration("backend origin is not configured".into())
        })?;
        let backend = BackendClient::new(origin, self.session.timeout())?;
        Ok(SessionContext::new(app, backend))
    }

    fn fail(&self, id: Uuid, context: Option<SessionContext>, e: SessionError) -> Session {
        error!(
            event_name = "session.bootstrap.failed",
            event_domain = "session",
            session_id = %id,
            kind = ?e.kind(),
            "session bootstrap failed: {}",
            e
        );
        let phase = SessionPhase::from(&e);
        self.publish(phase.clone());
        Session::terminal(id, phase, context)
    }

    fn publish(&self, phase: SessionPhase) {
        info!(phase = phase.name(), "session phase changed");
        self.phase.send_replace(phase);
    }
}
