//! crates/mentor_core/src/memory.rs
//!
//! An in-memory `DatabaseService` used by the unit tests and for local
//! experiments. Behaves like the real store contract: point reads and
//! full-overwrite writes, equality and array-contains filters, no
//! versioning. Iteration order is the sorted document id order.

use crate::ports::{DatabaseService, Fields, PortResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Map-backed document store. Cheap to create per test.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> PortResult<Option<Fields>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> PortResult<()> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn find_eq(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<i64>,
    ) -> PortResult<Vec<(String, Fields)>> {
        let collections = self.collections.lock().await;
        let mut matches = Vec::new();
        if let Some(documents) = collections.get(collection) {
            for (id, fields) in documents {
                // Checked before the push so a zero limit matches nothing,
                // like the SQL LIMIT it mirrors.
                if let Some(limit) = limit {
                    if matches.len() as i64 >= limit {
                        break;
                    }
                }
                let hit = filters
                    .iter()
                    .all(|(field, value)| fields.get(*field) == Some(value));
                if hit {
                    matches.push((id.clone(), fields.clone()));
                }
            }
        }
        Ok(matches)
    }

    async fn find_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> PortResult<Vec<(String, Fields)>> {
        let collections = self.collections.lock().await;
        let mut matches = Vec::new();
        if let Some(documents) = collections.get(collection) {
            for (id, fields) in documents {
                if let Some(Value::Array(items)) = fields.get(field) {
                    if items.contains(&value) {
                        matches.push((id.clone(), fields.clone()));
                    }
                }
            }
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn set_overwrites_the_whole_document() {
        let store = MemoryStore::new();
        store
            .set("users", "u1", fields(json!({"email": "a@b.c", "role": "student"})))
            .await
            .unwrap();
        store
            .set("users", "u1", fields(json!({"email": "a@b.c"})))
            .await
            .unwrap();

        let stored = store.get("users", "u1").await.unwrap().unwrap();
        assert!(!stored.contains_key("role"));
    }

    #[tokio::test]
    async fn find_eq_applies_every_filter_and_the_limit() {
        let store = MemoryStore::new();
        for (id, status) in [("s1", "scheduled"), ("s2", "completed"), ("s3", "scheduled")] {
            store
                .set(
                    "sessions",
                    id,
                    fields(json!({"volunteer_id": "v1", "status": status})),
                )
                .await
                .unwrap();
        }
        store
            .set(
                "sessions",
                "s4",
                fields(json!({"volunteer_id": "v2", "status": "scheduled"})),
            )
            .await
            .unwrap();

        let all = store
            .find_eq(
                "sessions",
                &[("volunteer_id", json!("v1")), ("status", json!("scheduled"))],
                None,
            )
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
            vec!["s1", "s3"]
        );

        let first = store
            .find_eq("sessions", &[("volunteer_id", json!("v1"))], Some(1))
            .await
            .unwrap();
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn find_eq_with_a_zero_limit_matches_nothing() {
        let store = MemoryStore::new();
        store
            .set("sessions", "s1", fields(json!({"volunteer_id": "v1"})))
            .await
            .unwrap();

        let none = store
            .find_eq("sessions", &[("volunteer_id", json!("v1"))], Some(0))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_array_contains_matches_exact_elements_only() {
        let store = MemoryStore::new();
        store
            .set("volunteers", "v1", fields(json!({"topics": ["OS", "DSA"]})))
            .await
            .unwrap();
        store
            .set("volunteers", "v2", fields(json!({"topics": ["os"]})))
            .await
            .unwrap();
        store
            .set("volunteers", "v3", fields(json!({"status": "offline"})))
            .await
            .unwrap();

        let hits = store
            .find_array_contains("volunteers", "topics", json!("OS"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "v1");
    }
}
