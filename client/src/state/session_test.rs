use super::*;
use crate::net::types::User;

fn signed_in() -> SessionState {
    SessionState {
        user: Some(User {
            id: "u1".to_owned(),
            email: Some("ada@example.com".to_owned()),
            first_name: Some("Ada".to_owned()),
            last_name: None,
        }),
        loading: false,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = SessionState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&SessionState::pending()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = signed_in();
    assert!(state.is_signed_in());
    assert!(!should_redirect_unauth(&state));
}
