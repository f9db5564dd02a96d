use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::HostBridge;
use crate::models::{AppHandle, SessionToken};

/// Config for a bridge that talks to a token-issuing relay over HTTP.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct HttpBridgeConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Endpoint that issues signed session tokens.
    pub token_uri: String,
    /// Endpoint that relays remote redirect actions to the parent frame.
    pub redirect_uri: Option<String>,
}

fn default_name() -> String {
    "http".to_string()
}

/// A host bridge backed by an HTTP relay.
///
/// `POST {token_uri}` with `{"apiKey","host","forceRedirect"}` answers
/// `{"token": "..."}`; `POST {redirect_uri}` with `{"action":"REMOTE","url"}`
/// forwards a redirect to the parent frame.
pub struct HttpBridge {
    config: HttpBridgeConfig,
    client: reqwest::Client,
}

impl HttpBridge {
    pub fn new(config: &HttpBridgeConfig) -> Self {
        info!(
            "Creating HTTP host bridge '{}' with token endpoint '{}'",
            config.name, config.token_uri
        );
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl HostBridge for HttpBridge {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    async fn request_token(&self, app: &AppHandle) -> Result<SessionToken, String> {
        debug!("Requesting session token from '{}'", self.config.token_uri);

        let request_body = serde_json::json!({
            "apiKey": app.api_key(),
            "host": app.host().as_str(),
            "forceRedirect": app.force_redirect(),
        });

        let response = self
            .client
            .post(&self.config.token_uri)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| format!("Failed to call token endpoint: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "Token endpoint returned unexpected status code: {}",
                response.status()
            ));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| format!("Failed to parse token JSON: {}", e))?;

        body.get("token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .map(SessionToken::new)
            .ok_or_else(|| "Failed to retrieve token from bridge response".to_string())
    }

    async fn redirect_remote(&self, app: &AppHandle, url: &str) -> Result<(), String> {
        let redirect_uri = self
            .config
            .redirect_uri
            .as_deref()
            .ok_or_else(|| format!("Bridge '{}' has no redirect endpoint", self.config.name))?;

        debug!(
            "Dispatching remote redirect for host '{}' via '{}'",
            app.host(),
            redirect_uri
        );

        let response = self
            .client
            .post(redirect_uri)
            .json(&serde_json::json!({ "action": "REMOTE", "url": url }))
            .send()
            .await
            .map_err(|e| format!("Failed to call redirect endpoint: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!(
                "Redirect endpoint returned unexpected status code: {}",
                response.status()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TenantId;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn bridge(server: &Server, with_redirect: bool) -> HttpBridge {
        HttpBridge::new(&HttpBridgeConfig {
            name: "relay".to_string(),
            token_uri: format!("{}/token", server.url()),
            redirect_uri: with_redirect.then(|| format!("{}/redirect", server.url())),
        })
    }

    fn app() -> AppHandle {
        AppHandle::new("key-1", TenantId::new("aG9zdA"), true)
    }

    /// The bridge posts the handle and returns the issued token.
    #[tokio::test]
    async fn test_request_token_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/token")
            .match_body(Matcher::Json(
                json!({"apiKey": "key-1", "host": "aG9zdA", "forceRedirect": true}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "signed.jwt.value"}"#)
            .create_async()
            .await;

        let token = bridge(&server, false).request_token(&app()).await;
        m.assert_async().await;
        assert_eq!(token.expect("token").as_str(), "signed.jwt.value");
    }

    /// A non-2xx answer from the relay is an error, not an empty token.
    #[tokio::test]
    async fn test_request_token_rejected() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/token")
            .with_status(401)
            .with_body("revoked")
            .create_async()
            .await;

        let result = bridge(&server, false).request_token(&app()).await;
        m.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_request_token_missing_field() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "wrong-key"}"#)
            .create_async()
            .await;

        assert!(bridge(&server, false).request_token(&app()).await.is_err());
    }

    #[tokio::test]
    async fn test_redirect_remote_posts_action() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/redirect")
            .match_body(Matcher::Json(
                json!({"action": "REMOTE", "url": "https://shop/admin/oauth/authorize"}),
            ))
            .with_status(204)
            .create_async()
            .await;

        let result = bridge(&server, true)
            .redirect_remote(&app(), "https://shop/admin/oauth/authorize")
            .await;
        m.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_redirect_remote_without_endpoint() {
        let server = Server::new_async().await;
        let result = bridge(&server, false)
            .redirect_remote(&app(), "https://shop")
            .await;
        assert!(result.is_err());
    }
}
