//! Aggregation-client error types.

use thiserror::Error;

/// Errors from an aggregate fetch.
///
/// All variants mean the same thing to the consumer: the poll failed and no
/// snapshot was produced. The client deliberately does not classify errors
/// as retryable or fatal — retry policy (the next scheduled poll) belongs to
/// the caller.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Transport failure (connection refused, timeout, TLS, …).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// The response carried a query-error payload.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// A 2xx response without a `data` object.
    #[error("response carried no data object")]
    MissingData,

    /// The response body could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}
