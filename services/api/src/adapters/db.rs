//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. Every domain document is
//! stored as one JSONB row in a single `documents` table in PostgreSQL, keyed by
//! `(collection, id)`, so the adapter never needs to know the field layout of
//! the things it stores.

use async_trait::async_trait;
use mentor_core::ports::{DatabaseService, Fields, PortError, PortResult};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// Row Conversion Helpers
//=========================================================================================

fn value_to_fields(value: Value) -> PortResult<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(PortError::Storage(format!(
            "Stored document is not a JSON object: {other}"
        ))),
    }
}

fn row_to_doc(row: PgRow) -> PortResult<(String, Fields)> {
    let id: String = row
        .try_get("id")
        .map_err(|e| PortError::Storage(e.to_string()))?;
    let data: Value = row
        .try_get("data")
        .map_err(|e| PortError::Storage(e.to_string()))?;
    Ok((id, value_to_fields(data)?))
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn get(&self, collection: &str, id: &str) -> PortResult<Option<Fields>> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;

        match row {
            Some(row) => {
                let data: Value = row
                    .try_get("data")
                    .map_err(|e| PortError::Storage(e.to_string()))?;
                Ok(Some(value_to_fields(data)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn find_eq(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<i64>,
    ) -> PortResult<Vec<(String, Fields)>> {
        // JSONB containment is equality for the scalar filter values the core
        // issues (ids, statuses, emails). A NULL limit means no limit.
        let mut wanted = Fields::new();
        for (field, value) in filters {
            wanted.insert((*field).to_string(), value.clone());
        }

        let rows = sqlx::query(
            "SELECT id, data FROM documents \
             WHERE collection = $1 AND data @> $2 \
             ORDER BY id \
             LIMIT $3",
        )
        .bind(collection)
        .bind(Json(Value::Object(wanted)))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        rows.into_iter().map(row_to_doc).collect()
    }

    async fn find_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> PortResult<Vec<(String, Fields)>> {
        let rows = sqlx::query(
            "SELECT id, data FROM documents \
             WHERE collection = $1 AND data -> $2 @> $3 \
             ORDER BY id",
        )
        .bind(collection)
        .bind(field)
        .bind(Json(Value::Array(vec![value])))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        rows.into_iter().map(row_to_doc).collect()
    }
}
