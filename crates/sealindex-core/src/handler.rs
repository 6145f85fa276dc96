//! Event dispatcher — routes a raw envelope to its entity collection.

use tracing::debug;

use crate::entity::normalize;
use crate::error::IndexError;
use crate::event::{EventEnvelope, EventKind};
use crate::store::EntityStore;

/// Applies contract events to an entity store.
///
/// One generic transformation covers all event kinds: the kind's field map
/// (see [`EventKind::field_map`]) tells `dispatch` how to normalize the
/// envelope, and the result is a single upsert keyed by the composite id.
/// Dispatching the same envelope twice stores the same entity twice — a
/// no-op the second time.
///
/// There is no retry or validation beyond envelope shape; a malformed
/// envelope or a storage failure propagates to the caller (the indexing
/// runtime owns retries).
pub struct EventDispatcher<S> {
    store: S,
}

impl<S: EntityStore> EventDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Normalize `envelope` as a `kind` event and upsert the entity.
    pub async fn dispatch(
        &self,
        kind: EventKind,
        envelope: &EventEnvelope,
    ) -> Result<(), IndexError> {
        let entity = normalize(kind, envelope)?;
        let id = entity.id.clone();
        self.store.set(kind.entity_type(), entity).await?;
        debug!(
            entity_type = kind.entity_type(),
            %id,
            block = envelope.block.number,
            "entity stored"
        );
        Ok(())
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
