//! SQLite-backed content store.
//!
//! One table, composite primary key, upsert conflict target on that key.
//! File databases run in WAL mode; in-memory databases are capped at a
//! single pooled connection because SQLite gives every connection its own
//! `:memory:` database.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use super::{CacheEntry, ContentKey, ContentStore};
use crate::{Error, Result};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS ai_generated_content (
    entity_id    TEXT NOT NULL,
    entity_type  TEXT NOT NULL,
    content_kind TEXT NOT NULL,
    content      TEXT NOT NULL,
    updated_at   INTEGER NOT NULL,
    PRIMARY KEY (entity_id, entity_type, content_kind)
)";

/// Durable store on a single SQLite database.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) a file-backed database in WAL mode.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let url = format!("sqlite:{}", path.as_ref().display());
        let options = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Opens a private in-memory database, for tests and development.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(SqliteStore { pool })
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn select(&self, key: &ContentKey) -> Result<Option<CacheEntry>> {
        let row = sqlx::query(
            "SELECT content, updated_at FROM ai_generated_content \
             WHERE entity_id = ?1 AND entity_type = ?2 AND content_kind = ?3",
        )
        .bind(&key.entity_id)
        .bind(&key.entity_type)
        .bind(key.kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let content: String = row.try_get("content")?;
        let updated_at: i64 = row.try_get("updated_at")?;
        let content = serde_json::from_str(&content)?;
        let updated_at = DateTime::<Utc>::from_timestamp(updated_at, 0).ok_or_else(|| {
            Error::storage(format!("row for {key} carries an unrepresentable timestamp"))
        })?;
        Ok(Some(CacheEntry::new(key.clone(), content, updated_at)))
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<()> {
        let content = serde_json::to_string(&entry.content)?;
        sqlx::query(
            "INSERT INTO ai_generated_content \
                 (entity_id, entity_type, content_kind, content, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT (entity_id, entity_type, content_kind) \
             DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at",
        )
        .bind(&entry.key.entity_id)
        .bind(&entry.key.entity_type)
        .bind(entry.key.kind.as_str())
        .bind(&content)
        .bind(entry.updated_at.timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
