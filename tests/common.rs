#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use embedsession::bridge::{FrameContext, HostBridge};
use embedsession::config::{extract_config, AppConfig, ConfigV1, SessionConfig};
use embedsession::models::{AppHandle, SessionToken};
use figment::providers::{Format, Yaml};
use figment::Figment;

pub const API_KEY: &str = "aeb97ee2e4b822c6";
pub const HOST: &str = "YWRtaW4uc2hvcGlmeS5jb20vc3RvcmUvc2hvcDE";

/// Issues `tok-1`, `tok-2`, ... or fails every request once `fail` is set.
#[derive(Default)]
pub struct MockBridge {
    issued: AtomicUsize,
    fail: AtomicBool,
    stall_redirects: AtomicBool,
    redirects: Mutex<Vec<String>>,
}

impl MockBridge {
    pub fn failing() -> Self {
        let bridge = Self::default();
        bridge.fail.store(true, Ordering::SeqCst);
        bridge
    }

    /// A bridge whose remote redirects never complete.
    pub fn stalled_redirects() -> Self {
        let bridge = Self::default();
        bridge.stall_redirects.store(true, Ordering::SeqCst);
        bridge
    }

    pub fn token_requests(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostBridge for MockBridge {
    fn get_name(&self) -> &str {
        "mock"
    }

    async fn request_token(&self, _app: &AppHandle) -> Result<SessionToken, String> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err("bridge unavailable".to_string());
        }
        Ok(SessionToken::new(format!("tok-{}", n)))
    }

    async fn redirect_remote(&self, _app: &AppHandle, url: &str) -> Result<(), String> {
        self.redirects.lock().unwrap().push(url.to_string());
        if self.stall_redirects.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

pub struct MockFrame {
    top_level: bool,
    navigations: Mutex<Vec<String>>,
}

impl MockFrame {
    pub fn top_level() -> Self {
        Self {
            top_level: true,
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn embedded() -> Self {
        Self {
            top_level: false,
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl FrameContext for MockFrame {
    fn is_top_level(&self) -> bool {
        self.top_level
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn app_config(backend_origin: &str) -> AppConfig {
    AppConfig {
        api_key: Some(API_KEY.to_string()),
        backend_origin: Some(backend_origin.to_string()),
        page_url: Some(format!("https://app.example/?embedded=1&host={}", HOST)),
        ..AppConfig::default()
    }
}

pub fn fast_session_config() -> SessionConfig {
    SessionConfig {
        refresh_interval_in_ms: 50,
        timeout_in_ms: 3000,
    }
}

pub fn load_test_config(backend_origin: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
app:
  api_key: "{API_KEY}"
  backend_origin: "{backend_origin}"
  page_url: "https://app.example/?host={HOST}"
bridge:
  type: "static"
  token: "unused"
session:
  refresh_interval_in_ms: 50
  timeout_in_ms: 3000
logging:
  level: "debug"
  format: "json"
bind_address: 127.0.0.1:0
"#
    );
    extract_config(Figment::new().merge(Yaml::string(&yaml))).expect("Failed to parse test config YAML")
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
