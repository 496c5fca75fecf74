use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::Record;
use crate::backend::{Document, DocumentStore, StoreError};

/// Storage abstraction so dashboard views do not care where records live.
pub trait RecordRepository<R: Record>: Send + Sync {
    fn list(&self) -> Result<Vec<R>, RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<R>, RepositoryError>;
    /// Records whose top-level `field` equals `value` in their JSON form.
    fn find_by(&self, field: &str, value: &Value) -> Result<Vec<R>, RepositoryError>;
    fn insert(&self, record: R) -> Result<R, RepositoryError>;
    fn update(&self, record: R) -> Result<(), RepositoryError>;
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("record could not be encoded: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<StoreError> for RepositoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(reason) => Self::Unavailable(reason),
            StoreError::Codec { source, .. } => Self::Codec(source),
        }
    }
}

/// Records held in local memory only, ordered by id.
pub struct InMemoryRepository<R> {
    records: Mutex<BTreeMap<String, R>>,
}

impl<R> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<R: Record> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: impl IntoIterator<Item = R>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<R: Record> RecordRepository<R> for InMemoryRepository<R> {
    fn list(&self) -> Result<Vec<R>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &str) -> Result<Option<R>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by(&self, field: &str, value: &Value) -> Result<Vec<R>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut matches = Vec::new();
        for record in guard.values() {
            let encoded = serde_json::to_value(record)?;
            if encoded.get(field) == Some(value) {
                matches.push(record.clone());
            }
        }
        Ok(matches)
    }

    fn insert(&self, record: R) -> Result<R, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id().to_string(), record.clone());
        Ok(record)
    }

    fn update(&self, record: R) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(record.id()) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Records persisted as camelCase JSON documents in `R::COLLECTION`.
pub struct StoreRepository<R, S> {
    store: Arc<S>,
    _record: PhantomData<fn() -> R>,
}

impl<R, S> StoreRepository<R, S>
where
    R: Record,
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn decode(document: Document) -> Result<R, RepositoryError> {
        let Document { id, mut data } = document;
        if let Value::Object(fields) = &mut data {
            fields.entry("id").or_insert(Value::String(id));
        }
        Ok(serde_json::from_value(data)?)
    }

    fn encode(record: &R) -> Result<Value, RepositoryError> {
        Ok(serde_json::to_value(record)?)
    }
}

impl<R, S> RecordRepository<R> for StoreRepository<R, S>
where
    R: Record,
    S: DocumentStore + 'static,
{
    fn list(&self) -> Result<Vec<R>, RepositoryError> {
        self.store
            .list_collection(R::COLLECTION)?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    fn fetch(&self, id: &str) -> Result<Option<R>, RepositoryError> {
        self.store
            .get_document(R::COLLECTION, id)?
            .map(Self::decode)
            .transpose()
    }

    fn find_by(&self, field: &str, value: &Value) -> Result<Vec<R>, RepositoryError> {
        self.store
            .query_collection(R::COLLECTION, field, value)?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    fn insert(&self, record: R) -> Result<R, RepositoryError> {
        if self.store.get_document(R::COLLECTION, record.id())?.is_some() {
            return Err(RepositoryError::Conflict);
        }
        self.store
            .set_document(R::COLLECTION, record.id(), Self::encode(&record)?)?;
        Ok(record)
    }

    fn update(&self, record: R) -> Result<(), RepositoryError> {
        if self.store.get_document(R::COLLECTION, record.id())?.is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.store
            .set_document(R::COLLECTION, record.id(), Self::encode(&record)?)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        if self.store.delete_document(R::COLLECTION, id)? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}
