use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::http_bridge::{HttpBridge, HttpBridgeConfig};
use super::static_bridge::{StaticBridge, StaticBridgeConfig};
use crate::models::{AppHandle, SessionToken};

/// Configuration options for the host bridge backing a session.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum BridgeConfig {
    #[serde(rename = "http")]
    Http(HttpBridgeConfig),
    #[serde(rename = "static")]
    Static(StaticBridgeConfig),
}

/// The platform capabilities the session lifecycle relies on.
///
/// Implementations wrap whatever SDK or transport the host platform offers;
/// the lifecycle only needs a token issuer and a way to make the parent
/// frame navigate.
#[async_trait::async_trait]
pub trait HostBridge: Send + Sync {
    fn get_name(&self) -> &str;

    /// Asks the platform for a fresh signed session token.
    async fn request_token(&self, app: &AppHandle) -> Result<SessionToken, String>;

    /// Instructs the parent (top-level) frame to navigate to `url`.
    async fn redirect_remote(&self, app: &AppHandle, url: &str) -> Result<(), String>;
}

/// Create a host bridge from a given config.
pub fn create_host_bridge(config: &BridgeConfig) -> Arc<dyn HostBridge> {
    match config {
        BridgeConfig::Http(cfg) => Arc::new(HttpBridge::new(cfg)),
        BridgeConfig::Static(cfg) => Arc::new(StaticBridge::new(cfg)),
    }
}
