use serde::Serialize;

use super::role::Role;
use super::route::{AppRoute, RouteAccess, LOGIN_PATH};
use super::session::Session;

/// Outcome of a navigation check. The caller performs the actual navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Render { route: AppRoute },
    Redirect { target: String },
    /// Identity known but role not resolved yet; show a loading state.
    Pending,
}

impl RouteDecision {
    pub fn redirect(target: impl Into<String>) -> Self {
        Self::Redirect {
            target: target.into(),
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { target } => Some(target),
            _ => None,
        }
    }
}

/// Verdict for an arbitrary required-role set, independent of any route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessVerdict {
    Allow,
    RedirectTo(&'static str),
    Pending,
}

/// Check `session` against an optional required-role set.
///
/// Missing identity always sends the user to login. Missing role defers the decision.
/// A role outside the set goes to that role's home.
pub fn check(session: &Session, required: Option<&[Role]>) -> AccessVerdict {
    if session.identity.is_none() {
        return AccessVerdict::RedirectTo(LOGIN_PATH);
    }

    let Some(required) = required else {
        return AccessVerdict::Allow;
    };

    match session.role {
        None => AccessVerdict::Pending,
        Some(role) if required.contains(&role) => AccessVerdict::Allow,
        Some(role) => AccessVerdict::RedirectTo(role.home()),
    }
}

/// Decide whether `route` renders for `session`.
pub fn evaluate(route: AppRoute, session: &Session) -> RouteDecision {
    let required = match route.access() {
        RouteAccess::Public => return RouteDecision::Render { route },
        RouteAccess::SignedIn => None,
        RouteAccess::Roles(roles) => Some(roles),
    };

    match check(session, required) {
        AccessVerdict::RedirectTo(target) => RouteDecision::redirect(target),
        AccessVerdict::Pending => RouteDecision::Pending,
        AccessVerdict::Allow if route == AppRoute::Root => dispatch_root(session),
        AccessVerdict::Allow => RouteDecision::Render { route },
    }
}

/// Parse `path` and evaluate it.
pub fn navigate(path: &str, session: &Session) -> RouteDecision {
    evaluate(AppRoute::parse(path), session)
}

fn dispatch_root(session: &Session) -> RouteDecision {
    match session.role {
        Some(role) => RouteDecision::redirect(role.home()),
        None => RouteDecision::Pending,
    }
}
