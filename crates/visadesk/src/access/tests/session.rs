use super::common::*;
use crate::access::{Role, Session, SessionError, SessionManager, SessionPhase, SessionState};

#[test]
fn state_machine_follows_login_resolution_and_logout() {
    let state = SessionState::Unauthenticated;
    let state = state.begin(identity("uid-1")).expect("login starts");
    assert_eq!(state.phase(), SessionPhase::Authenticating);
    assert_eq!(state.session().role, None);

    let state = state.resolve(Role::Admin).expect("role resolves");
    assert_eq!(state.session(), Session::authenticated(identity("uid-1"), Role::Admin));

    let state = state.end().expect("logout");
    assert_eq!(state, SessionState::Unauthenticated);
}

#[test]
fn rejects_transitions_outside_the_lifecycle() {
    let unauthenticated = SessionState::Unauthenticated;
    assert_eq!(
        unauthenticated.resolve(Role::Client),
        Err(SessionError::InvalidTransition {
            from: SessionPhase::Unauthenticated,
            to: SessionPhase::Authenticated,
        })
    );
    assert!(unauthenticated.end().is_err());

    let authenticating = SessionState::Authenticating {
        identity: identity("uid-1"),
    };
    assert!(authenticating.begin(identity("uid-2")).is_err());
    assert!(authenticating.end().is_err());

    let authenticated = SessionState::Authenticated {
        identity: identity("uid-1"),
        role: Role::Client,
    };
    assert!(authenticated.begin(identity("uid-2")).is_err());
    assert!(authenticated.resolve(Role::Admin).is_err());
}

#[test]
fn manager_leaves_state_untouched_on_invalid_transition() {
    let manager = SessionManager::new();
    assert!(manager.resolve(Role::Admin).is_err());
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
    assert_eq!(manager.session(), Session::anonymous());
}

#[tokio::test]
async fn subscribers_observe_every_change() {
    let manager = SessionManager::new();
    let mut changes = manager.subscribe();

    manager.begin(identity("uid-7")).expect("begin");
    changes.changed().await.expect("sender alive");
    assert_eq!(
        *changes.borrow_and_update(),
        Session::authenticating(identity("uid-7"))
    );

    manager.resolve(Role::Client).expect("resolve");
    changes.changed().await.expect("sender alive");
    assert_eq!(changes.borrow_and_update().role, Some(Role::Client));

    manager.end().expect("end");
    changes.changed().await.expect("sender alive");
    assert!(!changes.borrow().is_signed_in());
}
