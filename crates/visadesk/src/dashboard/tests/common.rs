use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::backend::InMemoryDocumentStore;
use crate::dashboard::{DashboardService, Repositories};
use crate::records::{Record, RecordRepository, RepositoryError, SeedData};

pub(super) fn seeded_service() -> DashboardService {
    DashboardService::new(Repositories::in_memory(&SeedData::demo()))
}

/// Same data set, persisted through the document store.
pub(super) fn store_service() -> (DashboardService, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let repositories = Repositories::store_backed(store.clone());
    let seed = SeedData::demo();
    for record in seed.applications {
        repositories.applications.insert(record).expect("seed application");
    }
    for record in seed.clients {
        repositories.clients.insert(record).expect("seed client");
    }
    for record in seed.brokers {
        repositories.brokers.insert(record).expect("seed broker");
    }
    for record in seed.payments {
        repositories.payments.insert(record).expect("seed payment");
    }
    (DashboardService::new(repositories), store)
}

/// Repository whose every call fails as if the backend were offline.
pub(super) struct OfflineRepository<R>(PhantomData<fn() -> R>);

impl<R> Default for OfflineRepository<R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("backend offline".to_string())
}

impl<R: Record> RecordRepository<R> for OfflineRepository<R> {
    fn list(&self) -> Result<Vec<R>, RepositoryError> {
        Err(offline())
    }

    fn fetch(&self, _id: &str) -> Result<Option<R>, RepositoryError> {
        Err(offline())
    }

    fn find_by(&self, _field: &str, _value: &Value) -> Result<Vec<R>, RepositoryError> {
        Err(offline())
    }

    fn insert(&self, _record: R) -> Result<R, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _record: R) -> Result<(), RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: &str) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

pub(super) fn offline_service() -> DashboardService {
    DashboardService::new(Repositories {
        applications: Arc::new(OfflineRepository::default()),
        clients: Arc::new(OfflineRepository::default()),
        brokers: Arc::new(OfflineRepository::default()),
        payments: Arc::new(OfflineRepository::default()),
    })
}
