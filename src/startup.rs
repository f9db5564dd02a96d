//! Application startup and server initialization.
//!
//! Bootstraps the session in the background and serves the status routes
//! while it runs.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::bridge::ConsoleFrame;
use crate::config::ConfigV1;
use crate::routes;
use crate::session::SessionBootstrap;
use crate::state::AppState;

/// Starts the first page load and the status server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let frame = Arc::new(ConsoleFrame::new(config.app.embedded));
    let bootstrap = Arc::new(SessionBootstrap::from_config(&config, frame));
    let state = AppState::new(bootstrap.clone());

    // Hold the slot before spawning so status requests see the load in flight.
    let mut slot = state.session.clone().lock_owned().await;
    tokio::spawn(async move {
        *slot = Some(bootstrap.run().await);
    });

    info!("Starting status server on {}", config.bind_address);
    let app = routes::create_router(state);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
