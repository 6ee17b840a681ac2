//! # Domain Models
//!
//! These structs represent the core entities of Foyer: the role a
//! session holds, one board message, and one stored image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authorization identity attached to a browser session, derived
/// from which passcode was accepted at login.
///
/// A session holds exactly one `Role` value, so exclusivity is
/// structural: a successful login overwrites the previous role and no
/// state exists in which two roles are true at once.
/// `Unauthenticated` doubles as the "no session" state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Unauthenticated,
    User,
    Admin,
    Guest,
    Chat,
    Moderator,
}

impl Role {
    /// Every role except `Unauthenticated` counts as logged in.
    pub fn is_logged_in(self) -> bool {
        !matches!(self, Role::Unauthenticated)
    }

    /// Roles that can read the board and post to it.
    pub fn can_view_messages(self) -> bool {
        matches!(self, Role::Admin | Role::Chat | Role::Moderator)
    }

    /// Roles that can delete individual messages. A moderator can both
    /// post and delete, but gains no image or clear grants.
    pub fn can_moderate_messages(self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }
}

/// A single board entry. No update operation exists; records are
/// created, deleted, or wiped wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique token, generated server-side, immutable.
    pub id: String,
    /// Display name; trimmed, may be empty.
    pub author: String,
    /// Body text; trimmed, never empty once stored.
    pub text: String,
    /// Seconds since epoch, assigned at creation. Display/sort key.
    pub ts: i64,
}

/// A stored image, identified by its filename under the images
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    /// Filesystem creation time; galleries list newest first.
    pub created: DateTime<Utc>,
}
