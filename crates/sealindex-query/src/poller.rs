//! The polling consumer — refreshes the aggregate snapshot on a fixed
//! interval.
//!
//! Each cycle replaces the whole snapshot on success; on failure the
//! previous snapshot is retained and the error message is surfaced until a
//! later poll succeeds. The loop never dies on a failed fetch.
//!
//! Fetches are issued sequentially: a fetch slower than the interval delays
//! the next tick rather than overlapping it. Cross-cycle consistency is not
//! guaranteed — two collections in one snapshot may reflect slightly
//! different indexing lag if the backend does not snapshot atomically.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::ActivityFetcher;
use crate::types::ActivitySnapshot;

/// Default refresh interval: 20 seconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20_000;

// ─── Config & state ──────────────────────────────────────────────────────────

/// Configuration for the polling consumer.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between poll cycles. The first fetch fires immediately.
    pub poll_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// The consumer-visible state: the last good snapshot plus error bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct PollerState {
    /// Last successfully fetched snapshot (default-empty until the first
    /// success).
    pub snapshot: ActivitySnapshot,
    /// Error message from the most recent poll, `None` after a success.
    pub last_error: Option<String>,
    /// When the snapshot was last replaced.
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Poll cycles completed, successful or not.
    pub polls: u64,
}

// ─── Poller ──────────────────────────────────────────────────────────────────

/// Spawns and owns the poll loop.
pub struct ActivityPoller;

impl ActivityPoller {
    /// Start polling `fetcher` on `config.poll_interval`.
    ///
    /// Returns a handle whose [`watch`] channel carries every state update.
    /// Dropping the handle cancels the loop — no timer outlives its owner.
    pub fn spawn<F>(fetcher: F, config: PollerConfig) -> PollerHandle
    where
        F: ActivityFetcher + 'static,
    {
        let (tx, rx) = watch::channel(PollerState::default());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(fetcher, config, tx, cancel.clone()));
        PollerHandle {
            state: rx,
            cancel,
            task,
        }
    }
}

async fn poll_loop<F: ActivityFetcher>(
    fetcher: F,
    config: PollerConfig,
    tx: watch::Sender<PollerState>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.poll_interval);
    info!(
        interval_ms = config.poll_interval.as_millis() as u64,
        "activity poller started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Cancellation mid-fetch abandons the request without touching state.
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = fetcher.fetch_all() => result,
        };

        match result {
            Ok(snapshot) => {
                tx.send_modify(|state| {
                    state.snapshot = snapshot;
                    state.last_error = None;
                    state.last_refreshed = Some(Utc::now());
                    state.polls += 1;
                });
            }
            Err(e) => {
                warn!(error = %e, "aggregate fetch failed; keeping previous snapshot");
                tx.send_modify(|state| {
                    state.last_error = Some(e.to_string());
                    state.polls += 1;
                });
            }
        }
    }

    info!("activity poller stopped");
}

// ─── Handle ──────────────────────────────────────────────────────────────────

/// Handle to a running poller.
pub struct PollerHandle {
    state: watch::Receiver<PollerState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// The current state (cloned).
    pub fn state(&self) -> PollerState {
        self.state.borrow().clone()
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.state.clone()
    }

    /// Cancel the loop and wait for it to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }

    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
