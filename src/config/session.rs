use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing knobs for the session lifecycle.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    /// Cadence of the token refresh loop.
    #[serde(default = "default_refresh_interval_in_ms")]
    pub refresh_interval_in_ms: u64,
    /// Upper bound on a single host bridge or backend call.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl SessionConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_in_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_in_ms: default_refresh_interval_in_ms(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

fn default_refresh_interval_in_ms() -> u64 {
    2000
}

fn default_timeout_in_ms() -> u64 {
    10_000
}
