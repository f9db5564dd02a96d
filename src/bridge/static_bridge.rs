use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::base::HostBridge;
use crate::models::{AppHandle, SessionToken};

/// A bridge that always hands out the same configured token.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StaticBridgeConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub token: String,
}

fn default_name() -> String {
    "static".to_string()
}

/// Useful for local development against a backend that accepts a fixed token.
pub struct StaticBridge {
    config: StaticBridgeConfig,
}

impl StaticBridge {
    pub fn new(config: &StaticBridgeConfig) -> Self {
        info!("Creating static host bridge '{}'", config.name);
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl HostBridge for StaticBridge {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    async fn request_token(&self, _app: &AppHandle) -> Result<SessionToken, String> {
        if self.config.token.is_empty() {
            return Err("static bridge has no token configured".to_string());
        }
        Ok(SessionToken::new(self.config.token.clone()))
    }

    async fn redirect_remote(&self, app: &AppHandle, url: &str) -> Result<(), String> {
        warn!(
            bridge = self.config.name.as_str(),
            host = app.host().as_str(),
            url,
            "static bridge cannot reach a parent frame; remote redirect only logged"
        );
        Ok(())
    }
}
