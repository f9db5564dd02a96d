use tracing::{debug, info, warn};

use super::redirect::RedirectDispatcher;
use crate::backend::BackendClient;
use crate::error::SessionError;
use crate::models::{AppHandle, AuthResult};

/// Outcome of one auth check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthCheck {
    Authenticated(AuthResult),
    /// The redirect to `authorization_url` has already been dispatched; the
    /// caller's only job is to stop.
    Unauthenticated {
        result: AuthResult,
        authorization_url: String,
    },
}

/// Builds the platform's OAuth authorization URL.
///
/// Only the callback is percent-encoded; shop name and scopes go in as the
/// backend reported them.
pub fn authorization_url(shop_name: &str, scopes: &str, api_key: &str, redirect_uri: &str) -> String {
    format!(
        "https://{}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}",
        shop_name,
        api_key,
        scopes,
        urlencoding::encode(redirect_uri)
    )
}

/// Asks the backend whether the current tenant already has an authorized
/// session, and starts the OAuth flow when it does not.
///
/// Holds no state between calls: every check hits the backend.
pub struct AuthChecker {
    backend: BackendClient,
    app: AppHandle,
    callback_url: String,
    dispatcher: RedirectDispatcher,
}

impl AuthChecker {
    pub fn new(
        backend: BackendClient,
        app: AppHandle,
        oauth_callback_path: &str,
        dispatcher: RedirectDispatcher,
    ) -> Self {
        let callback_url = backend.url(oauth_callback_path);
        Self {
            backend,
            app,
            callback_url,
            dispatcher,
        }
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub async fn check_auth(&self) -> Result<AuthCheck, SessionError> {
        let body = self.backend.auth_check(self.app.host()).await?;
        let result = AuthResult::from_body(&body)?;
        debug!("Auth check result: {:?}", result);

        if result.authenticated {
            info!(
                event_name = "auth_check.authenticated",
                event_domain = "auth",
                shop_name = result.shop_name.as_deref().unwrap_or(""),
                "auth check succeeded"
            );
            return Ok(AuthCheck::Authenticated(result));
        }

        let shop_name = result.shop_name.as_deref().ok_or_else(|| {
            SessionError::Protocol("unauthenticated auth check is missing shopName".into())
        })?;
        let scopes = result.scopes.as_deref().ok_or_else(|| {
            SessionError::Protocol("unauthenticated auth check is missing scopes".into())
        })?;

        let authorization_url =
            authorization_url(shop_name, scopes, self.app.api_key(), &self.callback_url);
        warn!(
            event_name = "auth_check.unauthenticated",
            event_domain = "auth",
            shop_name,
            "auth check failed, redirecting to authorization"
        );

        self.dispatcher.redirect_to(&authorization_url).await?;

        Ok(AuthCheck::Unauthenticated {
            result,
            authorization_url,
        })
    }
}
