//! Entity-store contract.

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::IndexError;

/// Persistence contract for indexed entities: a mapping from
/// `(entity_type, id)` to an entity value.
///
/// `set` is a total overwrite-by-key — no partial merge. `get` returns
/// `None` for an absent key so callers can branch on presence without an
/// error path. `scan` returns a full collection in insertion order.
///
/// Each log is processed by exactly one dispatcher invocation, so no
/// concurrent writers race on a key.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Upsert an entity into its collection.
    async fn set(&self, entity_type: &str, entity: Entity) -> Result<(), IndexError>;

    /// Point lookup by id. `Ok(None)` when the key is absent.
    async fn get(&self, entity_type: &str, id: &str) -> Result<Option<Entity>, IndexError>;

    /// All entities of a collection, in insertion order.
    async fn scan(&self, entity_type: &str) -> Result<Vec<Entity>, IndexError>;
}
