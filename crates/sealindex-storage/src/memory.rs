//! In-memory entity store.
//!
//! Keeps each collection as an insertion-ordered vector in RAM. Useful for
//! tests and for embedding the dispatcher in short-lived tools that don't
//! need persistence. All data is lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use sealindex_core::entity::Entity;
use sealindex_core::error::IndexError;
use sealindex_core::store::EntityStore;

/// In-memory entity store.
///
/// `set` replaces an existing row in place, so a replayed log keeps its
/// position in the collection rather than moving to the end.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<Entity>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in a collection.
    pub fn len(&self, entity_type: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(entity_type)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Total rows across all collections.
    pub fn total_len(&self) -> usize {
        self.collections
            .lock()
            .unwrap()
            .values()
            .map(|rows| rows.len())
            .sum()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn set(&self, entity_type: &str, entity: Entity) -> Result<(), IndexError> {
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(entity_type.to_string()).or_default();
        match rows.iter_mut().find(|row| row.id == entity.id) {
            Some(row) => *row = entity,
            None => rows.push(entity),
        }
        Ok(())
    }

    async fn get(&self, entity_type: &str, id: &str) -> Result<Option<Entity>, IndexError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(entity_type)
            .and_then(|rows| rows.iter().find(|row| row.id == id).cloned()))
    }

    async fn scan(&self, entity_type: &str) -> Result<Vec<Entity>, IndexError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(entity_type)
            .cloned()
            .unwrap_or_default())
    }
}
