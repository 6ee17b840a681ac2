//! Cross-crate checks on the role model and the authorization gate,
//! exercised the way the handlers use them.

use domains::error::AppError;
use domains::models::Role;
use services::auth;

const ALL_ROLES: [Role; 5] = [
    Role::User,
    Role::Admin,
    Role::Guest,
    Role::Chat,
    Role::Moderator,
];

#[test]
fn the_gate_and_the_predicates_agree_on_message_access() {
    for role in ALL_ROLES {
        assert_eq!(
            auth::authorize(role, auth::MESSAGE_VIEW).is_ok(),
            role.can_view_messages(),
        );
        assert_eq!(
            auth::authorize(role, auth::MESSAGE_DELETE).is_ok(),
            role.can_moderate_messages(),
        );
    }
}

#[test]
fn moderator_grant_is_narrower_than_admin() {
    // A moderator can post and delete messages, but neither wipe the
    // board nor touch images.
    assert!(auth::authorize(Role::Moderator, auth::MESSAGE_POST).is_ok());
    assert!(auth::authorize(Role::Moderator, auth::MESSAGE_DELETE).is_ok());
    assert!(auth::authorize(Role::Moderator, auth::MESSAGE_CLEAR).is_err());
    assert!(auth::authorize(Role::Moderator, auth::IMAGE_DELETE).is_err());
    assert!(auth::authorize(Role::Moderator, auth::IMAGE_UPLOAD).is_err());
}

#[test]
fn denials_are_unauthorized_errors() {
    for role in ALL_ROLES {
        if let Err(err) = auth::authorize(role, auth::MESSAGE_CLEAR) {
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }
}

#[test]
fn a_session_holds_exactly_one_role_value() {
    // Role is Copy + Eq; overwriting is the only transition, so two
    // roles can never hold at once. This pins the closed set.
    let mut session_role = Role::Unauthenticated;
    assert!(!session_role.is_logged_in());
    session_role = Role::Admin;
    assert!(session_role.is_logged_in());
    session_role = Role::Guest;
    assert_eq!(session_role, Role::Guest);
    assert!(!session_role.can_view_messages());
}
