use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::role::Role;
use crate::backend::{DocumentStore, IdentityId, StoreError};

pub const USERS_COLLECTION: &str = "users";

/// Profile written for every account at signup and read back for its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Looks up a session's role in the `users` collection.
pub struct RoleResolver<S> {
    store: Arc<S>,
}

impl<S> Clone for RoleResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> RoleResolver<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve the role for `identity`, falling back to `Role::Client` whenever the
    /// profile is missing, malformed, or cannot be read.
    pub fn resolve(&self, identity: &IdentityId) -> Role {
        match self.store.get_document(USERS_COLLECTION, &identity.0) {
            Ok(Some(document)) => match document.str_field("role").and_then(Role::parse) {
                Some(role) => role,
                None => {
                    debug!(%identity, "user profile has no usable role; defaulting to client");
                    Role::Client
                }
            },
            Ok(None) => {
                debug!(%identity, "no user profile found; defaulting to client");
                Role::Client
            }
            Err(error) => {
                warn!(%identity, %error, "role lookup failed; defaulting to client");
                Role::Client
            }
        }
    }

    pub fn record_profile(
        &self,
        identity: &IdentityId,
        profile: &UserDocument,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(profile).map_err(|source| StoreError::Codec {
            collection: USERS_COLLECTION.to_string(),
            source,
        })?;
        self.store.set_document(USERS_COLLECTION, &identity.0, data)
    }
}
