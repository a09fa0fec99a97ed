//! crates/mentor_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the platform's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete document database and model API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The variants follow the platform's failure taxonomy: a missing referenced
/// document, a storage fault, a model-endpoint fault, and a catch-all. None
/// of the components retry; every fault surfaces to the caller immediately.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Mentor model error: {0}")]
    Model(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// The free-form field map of one stored document. The document id is the
/// store key and never appears among the fields.
pub type Fields = serde_json::Map<String, Value>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The document-store contract.
///
/// Collections map string ids to free-form field maps. The store offers point
/// reads, full-overwrite point writes, a conjunction of equality filters with
/// an optional single limit, and an exact array-contains filter. There are no
/// joins, no transactions and no versioning: concurrent read-modify-write
/// sequences are last-write-wins, and callers live with that.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Point read of one document. `Ok(None)` when the id has no document.
    async fn get(&self, collection: &str, id: &str) -> PortResult<Option<Fields>>;

    /// Full overwrite of the document at `id`, creating it if absent.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> PortResult<()>;

    /// Documents whose fields equal every `(field, value)` pair, up to
    /// `limit` when given. Order is store iteration order; callers must not
    /// rely on it.
    async fn find_eq(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<i64>,
    ) -> PortResult<Vec<(String, Fields)>>;

    /// Documents whose array field contains `value` exactly (case-sensitive,
    /// no normalization).
    async fn find_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> PortResult<Vec<(String, Fields)>>;
}

/// The generative-model black box: one text prompt in, generated text out.
#[async_trait]
pub trait MentorModelService: Send + Sync {
    async fn generate(&self, prompt: &str) -> PortResult<String>;
}

//=========================================================================================
// Document (De)serialization Helpers
//=========================================================================================

/// Serializes a domain value into a stored field map. `#[serde(skip)]` on the
/// id fields keeps the document key out of the fields.
pub fn to_fields<T: Serialize>(value: &T) -> PortResult<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(PortError::Unexpected(format!(
            "Document did not serialize to an object: {other}"
        ))),
        Err(e) => Err(PortError::Unexpected(e.to_string())),
    }
}

/// Deserializes a stored field map back into a domain value. The caller is
/// responsible for attaching the document id afterwards.
pub fn from_fields<T: DeserializeOwned>(fields: Fields) -> PortResult<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| PortError::Storage(e.to_string()))
}
