//! Shared application state.

use crate::session::{Session, SessionBootstrap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The page-load state machine; also the source of the live phase.
    pub bootstrap: Arc<SessionBootstrap>,
    /// The most recent completed page load, if any.
    pub session: Arc<Mutex<Option<Session>>>,
}

impl AppState {
    pub fn new(bootstrap: Arc<SessionBootstrap>) -> Self {
        Self {
            bootstrap,
            session: Arc::new(Mutex::new(None)),
        }
    }
}
