//! Error types for the indexing core.

use thiserror::Error;

/// Errors that can occur while normalizing or persisting an event.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The envelope's params record is missing a parameter the event kind
    /// requires. Nothing is written for this event.
    #[error("Malformed {event} envelope: missing param '{param}'")]
    MissingParam {
        event: &'static str,
        param: &'static str,
    },

    /// The envelope's params record carries a parameter the event kind does
    /// not define.
    #[error("Malformed {event} envelope: unknown param '{param}'")]
    UnknownParam { event: &'static str, param: String },

    /// The envelope's params value is not an object.
    #[error("Malformed {event} envelope: {reason}")]
    Malformed {
        event: &'static str,
        reason: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}
