//! SQLite entity store.
//!
//! Persists all collections in a single `entities` table keyed by
//! `(entity_type, id)`. Uses `sqlx` with WAL mode for concurrent read
//! performance.
//!
//! # Usage
//! ```rust,no_run
//! use sealindex_storage::sqlite::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // File-backed (persistent)
//! let store = SqliteStore::open("./sealindex.db").await?;
//!
//! // In-memory (tests / ephemeral)
//! let store = SqliteStore::in_memory().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use sealindex_core::entity::Entity;
use sealindex_core::error::IndexError;
use sealindex_core::store::EntityStore;

/// SQLite-backed entity store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at `path`.
    ///
    /// The path may be a plain file path (`"./sealindex.db"`) or a full
    /// SQLite URL (`"sqlite:./sealindex.db?mode=rwc"`).
    pub async fn open(path: &str) -> Result<Self, IndexError> {
        let url = if path.starts_with("sqlite:") {
            path.to_string()
        } else {
            format!("sqlite:{path}?mode=rwc")
        };

        let pool = SqlitePool::connect(&url)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Open an in-memory SQLite database.
    ///
    /// All data is lost when the pool is dropped. Ideal for tests.
    pub async fn in_memory() -> Result<Self, IndexError> {
        // Single connection: each pooled connection would otherwise open
        // its own private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the entities table and enable WAL mode.
    async fn init_schema(&self) -> Result<(), IndexError> {
        sqlx::query("PRAGMA journal_mode=WAL;")
            .execute(&self.pool)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS entities (
                entity_type TEXT NOT NULL,
                id          TEXT NOT NULL,
                fields      TEXT NOT NULL,
                PRIMARY KEY (entity_type, id)
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| IndexError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn set(&self, entity_type: &str, entity: Entity) -> Result<(), IndexError> {
        let fields = serde_json::to_string(&entity.fields)
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        // ON CONFLICT … DO UPDATE keeps the row's rowid, so a replayed log
        // does not move the row within scan order.
        sqlx::query(
            "INSERT INTO entities (entity_type, id, fields)
             VALUES (?, ?, ?)
             ON CONFLICT (entity_type, id) DO UPDATE SET fields = excluded.fields",
        )
        .bind(entity_type)
        .bind(&entity.id)
        .bind(&fields)
        .execute(&self.pool)
        .await
        .map_err(|e| IndexError::Storage(e.to_string()))?;

        debug!(entity_type, id = %entity.id, "entity stored");
        Ok(())
    }

    async fn get(&self, entity_type: &str, id: &str) -> Result<Option<Entity>, IndexError> {
        let row = sqlx::query("SELECT id, fields FROM entities WHERE entity_type = ? AND id = ?")
            .bind(entity_type)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        row.map(row_to_entity).transpose()
    }

    async fn scan(&self, entity_type: &str) -> Result<Vec<Entity>, IndexError> {
        let rows =
            sqlx::query("SELECT id, fields FROM entities WHERE entity_type = ? ORDER BY rowid")
                .bind(entity_type)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| IndexError::Storage(e.to_string()))?;

        rows.into_iter().map(row_to_entity).collect()
    }
}

fn row_to_entity(row: sqlx::sqlite::SqliteRow) -> Result<Entity, IndexError> {
    let fields_str: String = row.get("fields");
    let fields = serde_json::from_str(&fields_str).map_err(|e| IndexError::Storage(e.to_string()))?;
    Ok(Entity {
        id: row.get("id"),
        fields,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
