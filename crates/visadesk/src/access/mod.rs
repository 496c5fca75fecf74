//! Session lifecycle and the role guard deciding which views a session may reach.
//!
//! The guard is a pure function of `(route, session)`; session state lives in an
//! explicit `SessionManager` handed to whoever needs it.

pub mod auth;
pub mod guard;
pub mod registry;
pub mod resolver;
pub mod role;
pub mod route;
pub mod session;

#[cfg(test)]
mod tests;

pub use auth::{AccessError, AuthService};
pub use guard::{check, evaluate, navigate, AccessVerdict, RouteDecision};
pub use registry::{SessionRegistry, SessionToken, DEFAULT_SESSION_TTL};
pub use resolver::{RoleResolver, UserDocument, USERS_COLLECTION};
pub use role::Role;
pub use route::{AdminView, AppRoute, ClientView, RouteAccess, LOGIN_PATH, ROOT_PATH};
pub use session::{Session, SessionError, SessionManager, SessionPhase, SessionState};
