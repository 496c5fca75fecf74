use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

/// A keyed JSON record read from a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// Record-oriented persistence capability consumed by the portal.
pub trait DocumentStore: Send + Sync {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
    fn query_collection(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;
    fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
    fn set_document(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;
    /// Returns whether a document was removed.
    fn delete_document(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document in '{collection}' could not be decoded: {source}")]
    Codec {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

type Collection = BTreeMap<String, Value>;

/// Document store kept in process memory, ordered by collection and id.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<BTreeMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: &str) -> usize {
        let guard = self.collections.lock().expect("document store mutex poisoned");
        guard.get(collection).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.lock().expect("document store mutex poisoned");
        Ok(guard
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    fn query_collection(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.lock().expect("document store mutex poisoned");
        Ok(guard
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|(_, data)| data.get(field) == Some(value))
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.lock().expect("document store mutex poisoned");
        Ok(guard
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set_document(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let mut guard = self.collections.lock().expect("document store mutex poisoned");
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    fn delete_document(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.collections.lock().expect("document store mutex poisoned");
        Ok(guard
            .get_mut(collection)
            .map(|documents| documents.remove(id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_returns_none_for_missing_documents() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get_document("users", "nobody").unwrap().is_none());
        store
            .set_document("users", "uid-1", json!({ "role": "admin" }))
            .unwrap();
        let document = store.get_document("users", "uid-1").unwrap().expect("stored");
        assert_eq!(document.str_field("role"), Some("admin"));
        assert!(store.get_document("users", "uid-2").unwrap().is_none());
    }

    #[test]
    fn query_filters_on_field_equality() {
        let store = InMemoryDocumentStore::new();
        store
            .set_document("applications", "APP-002", json!({ "ownerIdentity": "u1" }))
            .unwrap();
        store
            .set_document("applications", "APP-001", json!({ "ownerIdentity": "u1" }))
            .unwrap();
        store
            .set_document("applications", "APP-003", json!({ "ownerIdentity": "u2" }))
            .unwrap();

        let owned = store
            .query_collection("applications", "ownerIdentity", &json!("u1"))
            .unwrap();
        let ids: Vec<&str> = owned.iter().map(|document| document.id.as_str()).collect();
        assert_eq!(ids, vec!["APP-001", "APP-002"]);
        assert!(store
            .query_collection("brokers", "ownerIdentity", &json!("u1"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryDocumentStore::new();
        store
            .set_document("brokers", "ROB-001", json!({ "name": "Agent A" }))
            .unwrap();
        assert!(store.delete_document("brokers", "ROB-001").unwrap());
        assert!(!store.delete_document("brokers", "ROB-001").unwrap());
        assert!(store.is_empty("brokers"));
    }
}
