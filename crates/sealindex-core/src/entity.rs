//! Entity records and the envelope → entity normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IndexError;
use crate::event::{EventEnvelope, EventKind};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A normalized record derived from one contract log event.
///
/// Entities are immutable once written: a later event of the same kind
/// produces a new entity with a new id, never an update to an existing one.
/// Replaying the same log reproduces the same id and the same value, so a
/// duplicate delivery is a no-op overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Composite id, `{chainId}_{blockNumber}_{logIndex}`.
    pub id: String,
    /// Normalized attributes (lower-camel-case names).
    pub fields: Map<String, Value>,
}

/// Build the composite entity id for a log's coordinates.
///
/// Exactly `{chainId}_{blockNumber}_{logIndex}` — no padding, no other
/// separators. Deterministic from the source log, which is what makes every
/// write idempotent.
pub fn composite_id(chain_id: u64, block_number: u64, log_index: u32) -> String {
    format!("{chain_id}_{block_number}_{log_index}")
}

impl EventEnvelope {
    /// The composite id of the entity this envelope produces.
    pub fn entity_id(&self) -> String {
        composite_id(self.chain_id, self.block.number, self.log_index)
    }
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Normalize a raw event envelope into an entity.
///
/// Pure and total over well-formed envelopes: every parameter in the kind's
/// field map is copied under its normalized name, and nothing else. A
/// missing parameter, an extra unrecognized parameter, or a non-object
/// `params` value is a malformed envelope — the error propagates and no
/// partial entity is produced.
pub fn normalize(kind: EventKind, envelope: &EventEnvelope) -> Result<Entity, IndexError> {
    let event = kind.entity_type();
    let params = envelope
        .params
        .as_object()
        .ok_or_else(|| IndexError::Malformed {
            event,
            reason: "params is not an object".into(),
        })?;

    let map = kind.field_map();
    let mut fields = Map::with_capacity(map.len());
    for mapping in map {
        let value = params.get(mapping.source).ok_or(IndexError::MissingParam {
            event,
            param: mapping.source,
        })?;
        fields.insert(mapping.normalized.to_string(), value.clone());
    }

    if let Some(extra) = params.keys().find(|k| !map.iter().any(|m| m.source == *k)) {
        return Err(IndexError::UnknownParam {
            event,
            param: extra.clone(),
        });
    }

    Ok(Entity {
        id: envelope.entity_id(),
        fields,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
