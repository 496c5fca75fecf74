//! Seams to the external identity provider and document store.

pub mod identity;
pub mod store;

pub use identity::{AuthError, IdentityId, IdentityProvider, InMemoryIdentityProvider};
pub use store::{Document, DocumentStore, InMemoryDocumentStore, StoreError};
