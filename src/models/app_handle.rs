use crate::config::AppConfig;
use crate::error::SessionError;

use super::tenant::TenantId;

/// Handle to the host bridge for one page load.
///
/// Built once from the tenant identifier and app key; every token request
/// and remote redirect is made through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppHandle {
    api_key: String,
    host: TenantId,
    force_redirect: bool,
}

impl AppHandle {
    pub fn new(api_key: impl Into<String>, host: TenantId, force_redirect: bool) -> Self {
        Self {
            api_key: api_key.into(),
            host,
            force_redirect,
        }
    }

    /// Builds the handle from app configuration and the tenant read off the page URL.
    ///
    /// Fails with a configuration error if the API key or tenant is missing or blank.
    pub fn from_config(config: &AppConfig, host: Option<TenantId>) -> Result<Self, SessionError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SessionError::Configuration("app API key is not configured".into()))?;

        let host = host.filter(|h| !h.is_empty()).ok_or_else(|| {
            SessionError::Configuration("tenant identifier (host) is missing from the page URL".into())
        })?;

        Ok(Self::new(api_key, host, config.force_redirect))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn host(&self) -> &TenantId {
        &self.host
    }

    pub fn force_redirect(&self) -> bool {
        self.force_redirect
    }
}
