use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::watch;

use super::role::Role;
use crate::backend::IdentityId;

/// The current user's identity and resolved role, passed explicitly to every check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub identity: Option<IdentityId>,
    pub role: Option<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticating(identity: IdentityId) -> Self {
        Self {
            identity: Some(identity),
            role: None,
        }
    }

    pub fn authenticated(identity: IdentityId, role: Role) -> Self {
        Self {
            identity: Some(identity),
            role: Some(role),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

impl SessionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a single session.
///
/// Valid moves: unauthenticated -> authenticating -> authenticated -> unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating {
        identity: IdentityId,
    },
    Authenticated {
        identity: IdentityId,
        role: Role,
    },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Unauthenticated => SessionPhase::Unauthenticated,
            Self::Authenticating { .. } => SessionPhase::Authenticating,
            Self::Authenticated { .. } => SessionPhase::Authenticated,
        }
    }

    pub fn session(&self) -> Session {
        match self {
            Self::Unauthenticated => Session::anonymous(),
            Self::Authenticating { identity } => Session::authenticating(identity.clone()),
            Self::Authenticated { identity, role } => {
                Session::authenticated(identity.clone(), *role)
            }
        }
    }

    pub fn begin(&self, identity: IdentityId) -> Result<Self, SessionError> {
        match self {
            Self::Unauthenticated => Ok(Self::Authenticating { identity }),
            other => Err(SessionError::invalid(other.phase(), SessionPhase::Authenticating)),
        }
    }

    pub fn resolve(&self, role: Role) -> Result<Self, SessionError> {
        match self {
            Self::Authenticating { identity } => Ok(Self::Authenticated {
                identity: identity.clone(),
                role,
            }),
            other => Err(SessionError::invalid(other.phase(), SessionPhase::Authenticated)),
        }
    }

    pub fn end(&self) -> Result<Self, SessionError> {
        match self {
            Self::Authenticated { .. } => Ok(Self::Unauthenticated),
            other => Err(SessionError::invalid(
                other.phase(),
                SessionPhase::Unauthenticated,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session cannot move from {from} to {to}")]
    InvalidTransition {
        from: SessionPhase,
        to: SessionPhase,
    },
}

impl SessionError {
    fn invalid(from: SessionPhase, to: SessionPhase) -> Self {
        Self::InvalidTransition { from, to }
    }
}

/// Owns one session's state. Reads go through `session`/`phase`; only the transition
/// methods write, and every write is published to `subscribe` receivers.
pub struct SessionManager {
    state: Mutex<SessionState>,
    changes: watch::Sender<Session>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Session::anonymous());
        Self {
            state: Mutex::new(SessionState::Unauthenticated),
            changes,
        }
    }

    pub fn session(&self) -> Session {
        self.state.lock().expect("session mutex poisoned").session()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().expect("session mutex poisoned").phase()
    }

    /// Observe identity and role changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.changes.subscribe()
    }

    pub fn begin(&self, identity: IdentityId) -> Result<Session, SessionError> {
        self.transition(|state| state.begin(identity))
    }

    pub fn resolve(&self, role: Role) -> Result<Session, SessionError> {
        self.transition(|state| state.resolve(role))
    }

    pub fn end(&self) -> Result<Session, SessionError> {
        self.transition(SessionState::end)
    }

    fn transition<F>(&self, step: F) -> Result<Session, SessionError>
    where
        F: FnOnce(&SessionState) -> Result<SessionState, SessionError>,
    {
        let mut guard = self.state.lock().expect("session mutex poisoned");
        let next = step(&*guard)?;
        let session = next.session();
        *guard = next;
        self.changes.send_replace(session.clone());
        Ok(session)
    }
}
