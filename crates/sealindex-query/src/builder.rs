//! Fluent builder for the aggregation client + poller pair.
//!
//! # Example
//!
//! ```rust,no_run
//! use sealindex_query::PollerBuilder;
//!
//! # async fn example() {
//! let handle = PollerBuilder::new("https://indexer.example.com/v1/graphql")
//!     .poll_interval_ms(20_000)
//!     .spawn();
//! let state = handle.state();
//! # }
//! ```

use std::time::Duration;

use crate::client::AggregateClient;
use crate::poller::{ActivityPoller, PollerConfig, PollerHandle, DEFAULT_POLL_INTERVAL_MS};

/// Fluent builder for a polling aggregation consumer.
pub struct PollerBuilder {
    endpoint: String,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl PollerBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the refresh interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the refresh interval in milliseconds.
    pub fn poll_interval_ms(self, ms: u64) -> Self {
        self.poll_interval(Duration::from_millis(ms))
    }

    /// Set the per-request HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build just the client (for one-shot fetches).
    pub fn build_client(&self) -> AggregateClient {
        AggregateClient::new(self.endpoint.clone(), self.request_timeout)
    }

    /// Build the client and start polling.
    pub fn spawn(self) -> PollerHandle {
        let client = AggregateClient::new(self.endpoint, self.request_timeout);
        ActivityPoller::spawn(
            client,
            PollerConfig {
                poll_interval: self.poll_interval,
            },
        )
    }
}
