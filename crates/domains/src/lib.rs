//! The central domain logic and interface definitions for Foyer.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn role_exclusivity_predicates() {
        assert!(!Role::Unauthenticated.is_logged_in());
        for role in [Role::User, Role::Admin, Role::Guest, Role::Chat, Role::Moderator] {
            assert!(role.is_logged_in());
        }

        assert!(Role::Moderator.can_view_messages());
        assert!(Role::Moderator.can_moderate_messages());
        assert!(Role::Chat.can_view_messages());
        assert!(!Role::Chat.can_moderate_messages());
        assert!(!Role::User.can_view_messages());
        assert!(!Role::Guest.can_view_messages());
    }

    #[test]
    fn role_round_trips_through_serde() {
        // Roles live inside the session store, so the serialized form
        // must survive a round trip unchanged.
        for role in [
            Role::Unauthenticated,
            Role::User,
            Role::Admin,
            Role::Guest,
            Role::Chat,
            Role::Moderator,
        ] {
            let encoded = serde_json::to_string(&role).unwrap();
            let decoded: Role = serde_json::from_str(&encoded).unwrap();
            assert_eq!(role, decoded);
        }
    }

    #[test]
    fn message_serializes_with_all_fields() {
        let message = Message {
            id: "abc".to_string(),
            author: String::new(),
            text: "hello".to_string(),
            ts: 1_700_000_000,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["author"], "");
        assert_eq!(value["text"], "hello");
        assert_eq!(value["ts"], 1_700_000_000_i64);
    }
}
