use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::session::SessionManager;

/// Bearer token handed to HTTP callers for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(pub Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Idle time after which a session is dropped when no TTL is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

struct SessionEntry {
    manager: Arc<SessionManager>,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= ttl
    }
}

/// Live sessions keyed by token. Each entry owns its own state machine.
///
/// Entries idle for longer than the TTL are expired: a lookup on one reads as missing,
/// and every insert sweeps the stale ones out.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionToken, SessionEntry>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn insert(&self, manager: Arc<SessionManager>) -> SessionToken {
        let token = SessionToken::generate();
        let now = Instant::now();
        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        let before = guard.len();
        guard.retain(|_, entry| !entry.is_expired(now, self.ttl));
        let swept = before - guard.len();
        if swept > 0 {
            debug!(swept, "expired sessions dropped");
        }
        guard.insert(
            token,
            SessionEntry {
                manager,
                last_seen: now,
            },
        );
        token
    }

    /// Live session for `token`. A hit refreshes its idle timer; an expired entry is
    /// removed and reads as missing.
    pub fn get(&self, token: &SessionToken) -> Option<Arc<SessionManager>> {
        let now = Instant::now();
        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        if guard.get(token)?.is_expired(now, self.ttl) {
            guard.remove(token);
            debug!(%token, "session expired");
            return None;
        }
        let entry = guard.get_mut(token)?;
        entry.last_seen = now;
        Some(entry.manager.clone())
    }

    pub fn remove(&self, token: &SessionToken) -> Option<Arc<SessionManager>> {
        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        guard.remove(token).map(|entry| entry.manager)
    }

    /// Number of entries held, expired ones not yet swept included.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session registry mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
