//! PostgreSQL-backed document store.
//!
//! All collections share one `documents` table; the collection name is a
//! column and the record body is stored as JSONB.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use super::{DocumentStore, Result};
use crate::document::{Document, DocumentId};

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: serde_json::Value,
}

/// Document store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    database: Option<String>,
}

impl PgDocumentStore {
    /// Build a store without opening any connection yet.
    ///
    /// `database` overrides the database named in `url`. Connection
    /// failures surface on the first operation, not here.
    pub fn connect_lazy(
        url: &str,
        database: Option<&str>,
        settings: &PoolSettings,
    ) -> Result<Self> {
        let mut options = PgConnectOptions::from_str(url)?;
        if let Some(database) = database {
            options = options.database(database);
        }
        let database = options.get_database().map(str::to_owned);

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy_with(options);

        Ok(Self { pool, database })
    }

    /// Create the documents table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        crate::migrate::migrate(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Pending operations fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("document store closed");
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, body: serde_json::Value) -> Result<DocumentId> {
        let id = DocumentId::generate();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(collection)
        .bind(Json(&body))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(collection)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Document {
                id: DocumentId::from_uuid(row.id),
                body: row.body,
            })
            .collect())
    }

    async fn list_collections(&self, limit: u32) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    fn database_name(&self) -> Option<&str> {
        self.database.as_deref()
    }
}
