//! Session status and reload endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::models::SessionPhase;
use crate::session::Session;
use crate::state::AppState;

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session_status))
        .route("/session/reload", post(reload_session))
}

#[derive(Serialize)]
struct SessionStatus {
    #[serde(flatten)]
    phase: SessionPhase,
    session_id: Option<String>,
    has_token: bool,
    refreshing: bool,
    products_loaded: bool,
    refresh_successes: u64,
    refresh_failures: u64,
}

impl SessionStatus {
    fn of(phase: SessionPhase, session: Option<&Session>) -> Self {
        let stats = session.and_then(Session::refresh_stats);
        Self {
            phase,
            session_id: session.map(|s| s.id().to_string()),
            has_token: session.map_or(false, |s| s.current_token().is_some()),
            refreshing: session.map_or(false, Session::is_refreshing),
            products_loaded: session.map_or(false, |s| s.products().is_some()),
            refresh_successes: stats.map_or(0, |s| s.successes()),
            refresh_failures: stats.map_or(0, |s| s.failures()),
        }
    }
}

/// Reports the current phase. While a bootstrap is in flight only the phase
/// (`checking`) is known.
async fn session_status(State(state): State<AppState>) -> Json<SessionStatus> {
    let phase = state.bootstrap.phase();
    let status = match state.session.try_lock() {
        Ok(guard) => SessionStatus::of(phase, guard.as_ref()),
        Err(_) => SessionStatus::of(phase, None),
    };
    Json(status)
}

/// Equivalent of reloading the page: tear the current session down and bootstrap again.
async fn reload_session(State(state): State<AppState>) -> Json<SessionStatus> {
    let mut guard = state.session.lock().await;
    if let Some(previous) = guard.take() {
        info!(session_id = %previous.id(), "reloading session");
        previous.shutdown().await;
    }

    let session = state.bootstrap.run().await;
    let status = SessionStatus::of(session.phase().clone(), Some(&session));
    *guard = Some(session);
    Json(status)
}
