use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::token_cell::SessionTokenCell;
use super::token_provider::TokenProvider;
use crate::models::AppHandle;
use crate::utils::log_throttle::LogThrottle;

const FAILURE_LOG_WINDOW: Duration = Duration::from_secs(30);
const FAILURE_EVENT: &str = "session.refresh.failed";

/// Counters kept by a running refresh loop.
#[derive(Debug, Default)]
pub struct RefreshStats {
    ticks: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
}

impl RefreshStats {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }
}

/// Keeps the session token fresh by re-requesting it at a fixed cadence.
pub struct TokenRefreshLoop;

impl TokenRefreshLoop {
    /// Starts the loop. The first request goes out one `every` after start.
    ///
    /// Every tick issues an independent request; slow requests are neither
    /// cancelled nor coalesced, so results can land out of order and the cell
    /// keeps whichever arrived last. A failed tick is logged and the next one
    /// retries unconditionally.
    ///
    /// `every` must be non-zero; zero is raised to one millisecond.
    pub fn spawn(
        provider: TokenProvider,
        app: AppHandle,
        cell: SessionTokenCell,
        every: Duration,
    ) -> RefreshHandle {
        let every = every.max(Duration::from_millis(1));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let stats = Arc::new(RefreshStats::default());
        let throttle = Arc::new(LogThrottle::new(FAILURE_LOG_WINDOW));

        let loop_stats = stats.clone();
        let task = tokio::spawn(async move {
            info!(
                event_name = "session.refresh.started",
                event_domain = "session",
                interval_ms = every.as_millis() as u64,
                "token refresh loop started"
            );
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    // Fires on an explicit stop and when the handle is dropped.
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        loop_stats.ticks.fetch_add(1, Ordering::SeqCst);
                        in_flight.spawn(refresh_once(
                            provider.clone(),
                            app.clone(),
                            cell.clone(),
                            loop_stats.clone(),
                            throttle.clone(),
                        ));
                    }
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }

            in_flight.abort_all();
            info!(
                event_name = "session.refresh.stopped",
                event_domain = "session",
                ticks = loop_stats.ticks(),
                failures = loop_stats.failures(),
                "token refresh loop stopped"
            );
        });

        RefreshHandle {
            stop_tx,
            task,
            stats,
        }
    }
}

async fn refresh_once(
    provider: TokenProvider,
    app: AppHandle,
    cell: SessionTokenCell,
    stats: Arc<RefreshStats>,
    throttle: Arc<LogThrottle>,
) {
    match provider.request_token(&app).await {
        Ok(token) => {
            cell.publish(token);
            stats.successes.fetch_add(1, Ordering::SeqCst);
            debug!("session token refreshed");
        }
        Err(e) => {
            stats.failures.fetch_add(1, Ordering::SeqCst);
            if let Some(suppressed_count) = throttle.should_emit(FAILURE_EVENT) {
                warn!(
                    event_name = FAILURE_EVENT,
                    event_domain = "session",
                    error = %e,
                    suppressed_count,
                    "token refresh failed, retrying on next tick"
                );
            }
        }
    }
}

/// Stop capability for a running [`TokenRefreshLoop`].
///
/// Dropping the handle stops the loop as well.
pub struct RefreshHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
    stats: Arc<RefreshStats>,
}

impl RefreshHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stats(&self) -> &RefreshStats {
        &self.stats
    }

    /// Stops the loop, abandons in-flight requests, and waits for the task to end.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                warn!("token refresh loop ended abnormally: {}", e);
            }
        }
    }
}
