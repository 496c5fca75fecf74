//! The portal facade: authentication, live sessions and dashboard data behind one
//! handle, plus the JSON router exposing it.

mod router;

use std::sync::Arc;
use std::time::Duration;

use crate::access::{
    AccessError, AuthService, Role, Session, SessionManager, SessionRegistry, SessionToken,
};
use chrono::Utc;
use tracing::info;

use crate::access::UserDocument;
use crate::backend::{
    DocumentStore, IdentityProvider, InMemoryDocumentStore, InMemoryIdentityProvider,
};
use crate::config::{DataConfig, DataSource};
use crate::dashboard::{DashboardService, Repositories};
use crate::records::{RepositoryError, SeedData};

pub use router::portal_router;

pub struct Portal<I, S> {
    auth: AuthService<I, S>,
    sessions: SessionRegistry,
    dashboard: DashboardService,
}

impl<I, S> Portal<I, S>
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(auth: AuthService<I, S>, dashboard: DashboardService) -> Self {
        Self {
            auth,
            sessions: SessionRegistry::new(),
            dashboard,
        }
    }

    /// Replace the session registry with one expiring sessions idle for `ttl`.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = SessionRegistry::with_ttl(ttl);
        self
    }

    pub fn auth(&self) -> &AuthService<I, S> {
        &self.auth
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    /// Sign in on a fresh session and register it under a new token.
    pub fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(SessionToken, Session), AccessError> {
        let manager = Arc::new(SessionManager::new());
        let session = self.auth.login(&manager, email, password)?;
        Ok((self.sessions.insert(manager), session))
    }

    /// Self-service signup. Accounts created here are always clients; admins are
    /// provisioned out of band.
    pub fn signup(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(SessionToken, Session), AccessError> {
        let manager = Arc::new(SessionManager::new());
        let session = self.auth.signup(&manager, email, password, Some(Role::Client))?;
        Ok((self.sessions.insert(manager), session))
    }

    /// End the session behind `token`. Unknown tokens yield `None`.
    pub fn logout(&self, token: &SessionToken) -> Result<Option<Session>, AccessError> {
        let Some(manager) = self.sessions.get(token) else {
            return Ok(None);
        };
        let session = self.auth.logout(&manager)?;
        self.sessions.remove(token);
        Ok(Some(session))
    }

    /// Session for `token`; missing or unknown tokens read as anonymous.
    pub fn session(&self, token: Option<&SessionToken>) -> Session {
        token
            .and_then(|token| self.sessions.get(token))
            .map(|manager| manager.session())
            .unwrap_or_default()
    }
}

/// Portal running entirely on process-local backends.
pub type LocalPortal = Portal<InMemoryIdentityProvider, InMemoryDocumentStore>;

impl LocalPortal {
    /// Build a local portal. Records come from in-memory lists or the document store
    /// depending on `data.source`; both start from `seed`.
    pub fn local(data: &DataConfig, seed: &SeedData) -> Result<Self, RepositoryError> {
        let identities = Arc::new(InMemoryIdentityProvider::new());
        let store = Arc::new(InMemoryDocumentStore::new());
        let auth = AuthService::new(identities.clone(), store.clone());

        if data.seed_accounts {
            for account in &seed.accounts {
                identities.register(account.identity.clone(), account.email, account.password);
                let profile = UserDocument {
                    email: account.email.to_string(),
                    role: account.role,
                    created_at: Utc::now(),
                };
                auth.resolver().record_profile(&account.identity, &profile)?;
            }
        }

        let repositories = match data.source {
            DataSource::Seeded => Repositories::in_memory(seed),
            DataSource::Store => {
                let repositories = Repositories::store_backed(store);
                seed_store(&repositories, seed)?;
                repositories
            }
        };

        info!(
            source = ?data.source,
            accounts = identities.account_count(),
            "local portal ready"
        );
        Ok(Self::new(auth, DashboardService::new(repositories)))
    }
}

fn seed_store(repositories: &Repositories, seed: &SeedData) -> Result<(), RepositoryError> {
    for record in &seed.applications {
        repositories.applications.insert(record.clone())?;
    }
    for record in &seed.clients {
        repositories.clients.insert(record.clone())?;
    }
    for record in &seed.brokers {
        repositories.brokers.insert(record.clone())?;
    }
    for record in &seed.payments {
        repositories.payments.insert(record.clone())?;
    }
    Ok(())
}
