//! # Session glue
//!
//! The session stores exactly one value: the caller's `Role` under
//! [`SESSION_ROLE_KEY`]. Keeping a single value makes role exclusivity
//! structural, since writing a new role replaces the old one in one
//! step and no state exists where two roles hold at once.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use domains::error::AppError;
use domains::models::Role;
use tower_sessions::Session;

/// Key for storing the role in the session.
pub const SESSION_ROLE_KEY: &str = "role";

/// Extractor yielding the caller's current role. Absent or unreadable
/// session data reads as `Unauthenticated`.
pub struct CurrentRole(pub Role);

impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let role = match session.get::<Role>(SESSION_ROLE_KEY).await {
            Ok(role) => role.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "session read failed, treating caller as unauthenticated");
                Role::Unauthenticated
            }
        };
        Ok(CurrentRole(role))
    }
}

/// Replaces whatever role the session held before.
pub async fn write_role(session: &Session, role: Role) -> Result<(), AppError> {
    session
        .insert(SESSION_ROLE_KEY, role)
        .await
        .map_err(|err| AppError::Internal(format!("session write: {err}")))
}

/// Drops the whole session, cookie included.
pub async fn clear(session: &Session) -> Result<(), AppError> {
    session
        .flush()
        .await
        .map_err(|err| AppError::Internal(format!("session clear: {err}")))
}
