//! Routing guarantees of the public guard: who reaches which view and where everyone
//! else is sent instead.

use std::sync::Arc;

use visadesk::access::{
    navigate, AdminView, AppRoute, AuthService, Role, RouteDecision, Session, SessionManager,
    SessionPhase,
};
use visadesk::backend::{IdentityId, InMemoryDocumentStore, InMemoryIdentityProvider};

fn signed_in(role: Role) -> Session {
    Session::authenticated(IdentityId(format!("uid-{}", role.as_str())), role)
}

const PROTECTED: &[&str] = &[
    "/",
    "/dashboard",
    "/applications",
    "/ApplicationDetails/APP-003",
    "/clients/ROC-002",
    "/brokers",
    "/finance",
    "/Settings",
    "/client",
    "/client/applications/APP-002",
    "/client/settings",
    "/anything/else",
];

#[test]
fn protected_paths_require_identity() {
    for path in PROTECTED {
        assert_eq!(
            navigate(path, &Session::anonymous()),
            RouteDecision::redirect("/login"),
            "{path}"
        );
    }
    assert!(navigate("/login", &Session::anonymous()).is_render());
}

#[test]
fn role_groups_never_render_for_the_other_role() {
    let client = signed_in(Role::Client);
    let admin = signed_in(Role::Admin);

    assert_eq!(
        navigate("/finance", &client).redirect_target(),
        Some("/client")
    );
    assert_eq!(
        navigate("/client/settings", &admin).redirect_target(),
        Some("/dashboard")
    );
    assert_eq!(navigate("/", &client).redirect_target(), Some("/client"));
    assert_eq!(navigate("/", &admin).redirect_target(), Some("/dashboard"));
}

#[test]
fn unknown_admin_paths_render_a_not_found_view() {
    let decision = navigate("/reports/2025", &signed_in(Role::Admin));
    match decision {
        RouteDecision::Render { route } => {
            assert_eq!(
                route,
                AppRoute::admin(AdminView::Unmatched("/reports/2025".into()))
            );
            assert!(route.is_not_found());
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn pending_role_defers_every_role_gated_path() {
    let pending = Session::authenticating(IdentityId("uid-1".into()));
    assert_eq!(navigate("/dashboard", &pending), RouteDecision::Pending);
    assert_eq!(navigate("/client", &pending), RouteDecision::Pending);
}

#[test]
fn profile_less_account_lands_on_client_home() {
    let identities = Arc::new(InMemoryIdentityProvider::new());
    identities.register(IdentityId("uid-7".into()), "nora@example.com", "long-enough");
    let auth = AuthService::new(identities, Arc::new(InMemoryDocumentStore::new()));
    let manager = SessionManager::new();

    let session = auth
        .login(&manager, "nora@example.com", "long-enough")
        .expect("login");
    assert_eq!(session.role, Some(Role::Client));
    assert_eq!(manager.phase(), SessionPhase::Authenticated);
    assert_eq!(navigate("/", &session).redirect_target(), Some("/client"));
}
