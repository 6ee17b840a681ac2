//! # Authorization Gate
//!
//! Static required-role sets per operation and the single predicate
//! deciding allow/deny. The gate runs at the boundary, before any
//! store or filesystem mutation.

use domains::error::{AppError, Result};
use domains::models::Role;

/// View the upload gallery.
pub const GALLERY_VIEW: &[Role] = &[Role::User];
/// Add images.
pub const IMAGE_UPLOAD: &[Role] = &[Role::User];
/// View the admin gallery.
pub const ADMIN_VIEW: &[Role] = &[Role::Admin];
/// Delete an image.
pub const IMAGE_DELETE: &[Role] = &[Role::Admin];
/// View the read-only guest gallery.
pub const GUEST_VIEW: &[Role] = &[Role::Guest];
/// Fetch raw image bytes. Any logged-in role qualifies.
pub const IMAGE_FETCH: &[Role] = &[
    Role::User,
    Role::Admin,
    Role::Guest,
    Role::Chat,
    Role::Moderator,
];
/// View the board page and read messages.
pub const MESSAGE_VIEW: &[Role] = &[Role::Admin, Role::Chat, Role::Moderator];
/// Post a message.
pub const MESSAGE_POST: &[Role] = MESSAGE_VIEW;
/// Delete a single message.
pub const MESSAGE_DELETE: &[Role] = &[Role::Admin, Role::Moderator];
/// Wipe the whole board.
pub const MESSAGE_CLEAR: &[Role] = &[Role::Admin];

/// `Ok` iff `current` appears in `allowed`.
pub fn authorize(current: Role, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&current) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "role {current:?} may not perform this operation"
        )))
    }
}
