use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use crate::access::{AuthService, Role, Session};
use crate::backend::{
    Document, DocumentStore, IdentityId, InMemoryDocumentStore, InMemoryIdentityProvider,
    StoreError,
};

pub(super) const ADMIN_EMAIL: &str = "ops@visadesk.test";
pub(super) const CLIENT_EMAIL: &str = "john@example.com";
pub(super) const PASSWORD: &str = "correct-horse";

pub(super) fn identity(raw: &str) -> IdentityId {
    IdentityId(raw.to_string())
}

pub(super) fn anonymous() -> Session {
    Session::anonymous()
}

pub(super) fn authenticating() -> Session {
    Session::authenticating(identity("uid-pending"))
}

pub(super) fn admin() -> Session {
    Session::authenticated(identity("uid-admin"), Role::Admin)
}

pub(super) fn client() -> Session {
    Session::authenticated(identity("uid-client"), Role::Client)
}

/// Admin paths from the routing surface, including one catch-all path.
pub(super) const ADMIN_PATHS: &[&str] = &[
    "/dashboard",
    "/applications",
    "/ApplicationDetails/APP-001",
    "/clients",
    "/clients/ROC-001",
    "/add-client",
    "/client-details",
    "/brokers",
    "/brokers/ROB-001",
    "/finance",
    "/Settings",
    "/reports",
];

pub(super) const CLIENT_PATHS: &[&str] = &[
    "/client",
    "/client/applications/APP-001",
    "/client/settings",
];

/// Store whose reads always fail, counting how often it was asked.
#[derive(Default)]
pub(super) struct UnavailableStore {
    pub(super) reads: AtomicUsize,
}

impl DocumentStore for UnavailableStore {
    fn get_document(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn query_collection(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn list_collection(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn set_document(&self, _collection: &str, _id: &str, _data: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn delete_document(&self, _collection: &str, _id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }
}

pub(super) struct Fixture {
    pub(super) identities: Arc<InMemoryIdentityProvider>,
    pub(super) store: Arc<InMemoryDocumentStore>,
    pub(super) auth: AuthService<InMemoryIdentityProvider, InMemoryDocumentStore>,
}

/// Identity provider with one admin and one client account, plus their profiles.
pub(super) fn fixture() -> Fixture {
    let identities = Arc::new(InMemoryIdentityProvider::new());
    let store = Arc::new(InMemoryDocumentStore::new());

    identities.register(identity("uid-admin"), ADMIN_EMAIL, PASSWORD);
    identities.register(identity("uid-client"), CLIENT_EMAIL, PASSWORD);
    store
        .set_document("users", "uid-admin", json!({ "email": ADMIN_EMAIL, "role": "admin" }))
        .expect("seed admin profile");
    store
        .set_document("users", "uid-client", json!({ "email": CLIENT_EMAIL, "role": "client" }))
        .expect("seed client profile");

    let auth = AuthService::new(identities.clone(), store.clone());
    Fixture {
        identities,
        store,
        auth,
    }
}
