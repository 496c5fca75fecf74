use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::resolver::{RoleResolver, UserDocument};
use super::role::Role;
use super::session::{Session, SessionError, SessionManager, SessionPhase};
use crate::backend::{AuthError, DocumentStore, IdentityId, IdentityProvider, StoreError};

/// Drives a session through login, signup and logout against the identity provider,
/// resolving the role only after the identity is known.
pub struct AuthService<I, S> {
    identity: Arc<I>,
    resolver: RoleResolver<S>,
}

impl<I, S> AuthService<I, S>
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(identity: Arc<I>, store: Arc<S>) -> Self {
        Self {
            identity,
            resolver: RoleResolver::new(store),
        }
    }

    pub fn resolver(&self) -> &RoleResolver<S> {
        &self.resolver
    }

    pub fn login(
        &self,
        manager: &SessionManager,
        email: &str,
        password: &str,
    ) -> Result<Session, AccessError> {
        ensure_signed_out(manager)?;
        let identity = self
            .identity
            .sign_in(email, password)
            .map_err(|error| {
                info!(%error, "login rejected");
                error
            })?;
        self.establish(manager, identity)
    }

    /// Create an account, write its profile, then sign it in. Role defaults to client.
    pub fn signup(
        &self,
        manager: &SessionManager,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Session, AccessError> {
        ensure_signed_out(manager)?;
        let identity = self
            .identity
            .create_account(email, password)
            .map_err(|error| {
                info!(%error, "signup rejected");
                error
            })?;

        let profile = UserDocument {
            email: email.trim().to_ascii_lowercase(),
            role: role.unwrap_or(Role::Client),
            created_at: Utc::now(),
        };
        self.resolver
            .record_profile(&identity, &profile)
            .map_err(AccessError::Profile)?;

        self.establish(manager, identity)
    }

    pub fn logout(&self, manager: &SessionManager) -> Result<Session, AccessError> {
        let Some(identity) = manager.session().identity else {
            return Err(SessionError::InvalidTransition {
                from: SessionPhase::Unauthenticated,
                to: SessionPhase::Unauthenticated,
            }
            .into());
        };

        self.identity.sign_out(&identity)?;
        let session = manager.end()?;
        info!(%identity, "session closed");
        Ok(session)
    }

    fn establish(
        &self,
        manager: &SessionManager,
        identity: IdentityId,
    ) -> Result<Session, AccessError> {
        manager.begin(identity.clone())?;
        let role = self.resolver.resolve(&identity);
        let session = manager.resolve(role)?;
        info!(%identity, role = role.as_str(), "session established");
        Ok(session)
    }
}

fn ensure_signed_out(manager: &SessionManager) -> Result<(), SessionError> {
    match manager.phase() {
        SessionPhase::Unauthenticated => Ok(()),
        phase => Err(SessionError::InvalidTransition {
            from: phase,
            to: SessionPhase::Authenticating,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to record user profile: {0}")]
    Profile(#[source] StoreError),
}

impl AccessError {
    /// Message safe to show next to the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AccessError::Auth(error) => error.user_message(),
            AccessError::Session(_) => "Your session changed. Please refresh and try again.",
            AccessError::Profile(_) => "Your account could not be set up. Please try again.",
        }
    }
}
