//! Scripted host bridge and frame used by the session unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::bridge::{FrameContext, HostBridge};
use crate::models::{AppHandle, SessionToken, TenantId};

pub fn app_handle() -> AppHandle {
    AppHandle::new("test-api-key", TenantId::new("dGVzdA"), false)
}

/// Replays a fixed list of token results, one per request. Once the script
/// is exhausted every further request fails.
pub struct ScriptedBridge {
    script: Mutex<VecDeque<Result<String, String>>>,
    delays: Mutex<VecDeque<Duration>>,
    requests: AtomicUsize,
    redirects: Mutex<Vec<String>>,
    stall_redirects: AtomicBool,
}

impl ScriptedBridge {
    pub fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delays: Mutex::new(VecDeque::new()),
            requests: AtomicUsize::new(0),
            redirects: Mutex::new(Vec::new()),
            stall_redirects: AtomicBool::new(false),
        }
    }

    /// Remote redirects never complete.
    pub fn with_stalled_redirects(self) -> Self {
        self.stall_redirects.store(true, Ordering::SeqCst);
        self
    }

    /// Per-request latency, consumed in order alongside the script.
    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock().unwrap() = delays.into();
        self
    }

    pub fn token_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostBridge for ScriptedBridge {
    fn get_name(&self) -> &str {
        "scripted"
    }

    async fn request_token(&self, _app: &AppHandle) -> Result<SessionToken, String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let (next, delay) = {
            let next = self.script.lock().unwrap().pop_front();
            let delay = self.delays.lock().unwrap().pop_front();
            (next, delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match next {
            Some(Ok(token)) => Ok(SessionToken::new(token)),
            Some(Err(e)) => Err(e),
            None => Err("script exhausted".to_string()),
        }
    }

    async fn redirect_remote(&self, _app: &AppHandle, url: &str) -> Result<(), String> {
        self.redirects.lock().unwrap().push(url.to_string());
        if self.stall_redirects.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Frame that records navigations instead of performing them.
pub struct RecordingFrame {
    top_level: bool,
    navigations: Mutex<Vec<String>>,
}

impl RecordingFrame {
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

impl FrameContext for RecordingFrame {
    fn is_top_level(&self) -> bool {
        self.top_level
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
