use super::common::*;
use crate::access::{
    check, evaluate, navigate, AccessVerdict, AdminView, AppRoute, ClientView, Role,
    RouteDecision,
};

#[test]
fn anonymous_sessions_are_sent_to_login_everywhere() {
    for path in ADMIN_PATHS.iter().chain(CLIENT_PATHS).chain(["/"].iter()) {
        assert_eq!(
            navigate(path, &anonymous()),
            RouteDecision::redirect("/login"),
            "path {path}"
        );
    }
}

#[test]
fn missing_identity_wins_over_required_roles() {
    assert_eq!(
        check(&anonymous(), Some(&[Role::Admin, Role::Client][..])),
        AccessVerdict::RedirectTo("/login")
    );
    assert_eq!(check(&anonymous(), None), AccessVerdict::RedirectTo("/login"));
}

#[test]
fn login_renders_for_everyone() {
    for session in [anonymous(), authenticating(), admin(), client()] {
        assert_eq!(
            navigate("/login", &session),
            RouteDecision::Render {
                route: AppRoute::Login
            }
        );
    }
}

#[test]
fn clients_never_render_admin_paths() {
    for path in ADMIN_PATHS {
        let decision = navigate(path, &client());
        assert!(!decision.is_render(), "path {path}");
        assert_eq!(decision.redirect_target(), Some("/client"), "path {path}");
    }
}

#[test]
fn admins_are_redirected_away_from_client_paths() {
    for path in CLIENT_PATHS {
        assert_eq!(
            navigate(path, &admin()),
            RouteDecision::redirect("/dashboard"),
            "path {path}"
        );
    }
}

#[test]
fn matching_roles_render_their_group() {
    assert_eq!(
        navigate("/clients/ROC-004", &admin()),
        RouteDecision::Render {
            route: AppRoute::admin(AdminView::ClientDetail("ROC-004".into()))
        }
    );
    assert_eq!(
        navigate("/client/applications/APP-002", &client()),
        RouteDecision::Render {
            route: AppRoute::client(ClientView::ApplicationDetail("APP-002".into()))
        }
    );
}

#[test]
fn unresolved_role_defers_instead_of_redirecting_to_login() {
    for path in ADMIN_PATHS.iter().chain(CLIENT_PATHS).chain(["/"].iter()) {
        assert_eq!(navigate(path, &authenticating()), RouteDecision::Pending, "path {path}");
    }
    assert_eq!(
        check(&authenticating(), Some(&[Role::Admin][..])),
        AccessVerdict::Pending
    );
}

#[test]
fn root_dispatches_on_role() {
    assert_eq!(navigate("/", &admin()), RouteDecision::redirect("/dashboard"));
    assert_eq!(navigate("/", &client()), RouteDecision::redirect("/client"));
    assert_eq!(evaluate(AppRoute::Root, &authenticating()), RouteDecision::Pending);
}

#[test]
fn unrestricted_checks_allow_any_signed_in_session() {
    assert_eq!(check(&admin(), None), AccessVerdict::Allow);
    assert_eq!(check(&client(), None), AccessVerdict::Allow);
    assert_eq!(check(&client(), Some(&[Role::Admin, Role::Client][..])), AccessVerdict::Allow);
}

#[test]
fn admins_render_not_found_for_unknown_paths() {
    let decision = navigate("/reports/2025", &admin());
    match decision {
        RouteDecision::Render { route } => assert!(route.is_not_found()),
        other => panic!("expected render, got {other:?}"),
    }
}
