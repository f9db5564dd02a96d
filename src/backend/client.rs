use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::error::SessionError;
use crate::models::{SessionToken, TenantId};

pub const AUTH_CHECK_PATH: &str = "/embedded-auth-check";
pub const PRODUCT_LIST_PATH: &str = "/product-list";

/// Thin wrapper over the two backend endpoints the session touches.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    origin: String,
}

impl BackendClient {
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, SessionError> {
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            return Err(SessionError::Configuration(
                "backend origin is not configured".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Configuration(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            origin: origin.to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    /// `GET /embedded-auth-check`, authorized by the tenant identifier since no
    /// session token exists yet. Returns the raw body of a 2xx response.
    pub async fn auth_check(&self, tenant: &TenantId) -> Result<String, SessionError> {
        let url = self.url(AUTH_CHECK_PATH);
        debug!("Sending auth check request to: {}", url);

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, tenant.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SessionError::Transport(format!(
                "auth check returned unexpected status code: {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// `GET /product-list` with the current session token.
    pub async fn product_list(&self, token: &SessionToken) -> Result<Value, SessionError> {
        let url = self.url(PRODUCT_LIST_PATH);
        debug!("Sending product list request to: {}", url);

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SessionError::Transport(format!(
                "product list returned unexpected status code: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| SessionError::Protocol(format!("product list is not JSON: {}", e)))
    }
}
