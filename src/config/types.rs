use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use crate::bridge::BridgeConfig;

/// Environment variables with this prefix override values from the YAML file.
/// Nested keys are separated by `__`, e.g. `EMBEDSESSION_APP__API_KEY`.
pub const ENV_PREFIX: &str = "EMBEDSESSION_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub app: AppConfig,
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Identity of the embedded app and where its backend lives.
///
/// `api_key`, `backend_origin` and `page_url` are optional here on purpose:
/// their absence must surface as a configuration error phase at bootstrap,
/// not as a deserialization failure.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub backend_origin: Option<String>,
    /// The URL the app was loaded with; the tenant identifier is read from its `host` parameter.
    pub page_url: Option<String>,
    #[serde(default)]
    pub force_redirect: bool,
    /// Whether the headless binary should behave as if it runs inside the admin iframe.
    #[serde(default)]
    pub embedded: bool,
    #[serde(default = "default_oauth_callback_path")]
    pub oauth_callback_path: String,
}

fn default_oauth_callback_path() -> String {
    "/login/oauth2/code/shopify".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Load config from `./config.yaml`, with `EMBEDSESSION_*` environment overrides.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract_config(figment)
}

/// Extract a versioned config from an already assembled figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
