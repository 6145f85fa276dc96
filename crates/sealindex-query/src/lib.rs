//! sealindex-query — aggregation client and polling consumer for SealIndex.
//!
//! # Architecture
//!
//! ```text
//! PollerBuilder → ActivityPoller (interval loop, default 20 s)
//!                      ├── AggregateClient   (one POST, seven collections)
//!                      └── watch channel     (PollerState to consumers)
//! ```
//!
//! The snapshot is replaced wholesale on every successful poll; a failed
//! poll keeps the previous snapshot and surfaces the error until a later
//! poll succeeds.

pub mod builder;
pub mod client;
pub mod error;
pub mod poller;
pub mod types;

pub use builder::PollerBuilder;
pub use client::{aggregate_query, ActivityFetcher, AggregateClient};
pub use error::QueryError;
pub use poller::{ActivityPoller, PollerConfig, PollerHandle, PollerState, DEFAULT_POLL_INTERVAL_MS};
pub use types::{
    AccessRevokedRow, ActivitySnapshot, AdminRow, DocumentAddedRow, ShareAccessRow, UsernameRow,
};
