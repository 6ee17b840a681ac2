//! # Handlers
//!
//! Coordinates the flow between HTTP requests and the core ports.
//! Every gated operation resolves the caller's role first, then runs
//! the authorization gate, and only then touches a store.

use askama::Template;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use domains::error::AppError;
use domains::models::{Message, Role};
use serde::Deserialize;
use services::auth;
use tower_sessions::Session;

use crate::error::{ApiError, PageError};
use crate::session::{self, CurrentRole};
use crate::state::AppState;
use crate::ui::{AdminTemplate, ChatTemplate, GalleryTemplate, GuestTemplate, LoginTemplate};

/// Flash text carried across redirects, pre-encoded for the Location
/// header.
const FLASH_BAD_PASSCODE: &str = "Incorrect%20passcode";
const FLASH_UPLOADED: &str = "Images%20uploaded%20successfully";
const FLASH_NO_UPLOADS: &str = "No%20valid%20images%20uploaded";
const FLASH_IMAGE_DELETED: &str = "Image%20deleted";
const FLASH_IMAGE_MISSING: &str = "Image%20not%20found";

#[derive(Deserialize)]
pub struct FlashQuery {
    #[serde(default)]
    msg: String,
}

// ── Login / logout ──────────────────────────────────────────────────────────

pub async fn login_page(Query(query): Query<FlashQuery>) -> Result<Html<String>, PageError> {
    let page = LoginTemplate { flash: &query.msg };
    Ok(Html(page.render()?))
}

#[derive(Deserialize)]
pub struct LoginForm {
    passcode: String,
}

/// Where each role lands after login.
fn landing_page(role: Role) -> &'static str {
    match role {
        Role::User => "/gallery",
        Role::Admin => "/admin",
        Role::Guest => "/guest",
        Role::Chat | Role::Moderator => "/chat",
        Role::Unauthenticated => "/",
    }
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, PageError> {
    match state.auth.authenticate(&form.passcode) {
        Some(role) => {
            session::write_role(&session, role).await?;
            tracing::info!(?role, "login accepted");
            Ok(Redirect::to(landing_page(role)))
        }
        // A failed attempt leaves any existing session untouched.
        None => Ok(Redirect::to(&format!("/?msg={FLASH_BAD_PASSCODE}"))),
    }
}

pub async fn logout(session: Session) -> Result<Redirect, PageError> {
    session::clear(&session).await?;
    Ok(Redirect::to("/"))
}

// ── Galleries ───────────────────────────────────────────────────────────────

pub async fn user_gallery(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    auth::authorize(role, auth::GALLERY_VIEW)?;
    let images = state.media.list().await?;
    let page = GalleryTemplate {
        images: &images,
        flash: &query.msg,
    };
    Ok(Html(page.render()?))
}

pub async fn admin_gallery(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    auth::authorize(role, auth::ADMIN_VIEW)?;
    let images = state.media.list().await?;
    let page = AdminTemplate {
        images: &images,
        flash: &query.msg,
    };
    Ok(Html(page.render()?))
}

pub async fn guest_gallery(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
) -> Result<Html<String>, PageError> {
    auth::authorize(role, auth::GUEST_VIEW)?;
    let images = state.media.list().await?;
    let page = GuestTemplate { images: &images };
    Ok(Html(page.render()?))
}

pub async fn upload_images(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    mut multipart: Multipart,
) -> Result<Redirect, PageError> {
    auth::authorize(role, auth::IMAGE_UPLOAD)?;

    let mut saved = 0usize;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::ValidationError(format!("malformed upload: {err}")))?
    {
        if field.name() != Some("images") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::ValidationError(format!("malformed upload: {err}")))?;

        // Skip rejected files (wrong type, bad name) the way the
        // upload form skips empty selections; everything else is a
        // real failure.
        match state.media.save(&filename, data).await {
            Ok(stored) => {
                tracing::info!(filename = %stored, "image uploaded");
                saved += 1;
            }
            Err(AppError::ValidationError(reason)) => {
                tracing::debug!(%filename, %reason, "upload skipped");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let flash = if saved > 0 {
        FLASH_UPLOADED
    } else {
        FLASH_NO_UPLOADS
    };
    Ok(Redirect::to(&format!("/gallery?msg={flash}")))
}

#[derive(Deserialize)]
pub struct DeleteImageForm {
    filename: String,
}

pub async fn delete_image(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Form(form): Form<DeleteImageForm>,
) -> Result<Redirect, PageError> {
    auth::authorize(role, auth::IMAGE_DELETE)?;
    match state.media.delete(&form.filename).await {
        Ok(()) => {
            tracing::info!(filename = %form.filename, "image deleted");
            Ok(Redirect::to(&format!("/admin?msg={FLASH_IMAGE_DELETED}")))
        }
        Err(AppError::NotFound(..)) => {
            Ok(Redirect::to(&format!("/admin?msg={FLASH_IMAGE_MISSING}")))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn get_image(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Path(filename): Path<String>,
) -> Result<Response, PageError> {
    auth::authorize(role, auth::IMAGE_FETCH)?;
    match state.media.read(&filename).await? {
        Some((data, mime)) => {
            Ok(([(header::CONTENT_TYPE, mime.to_string())], data).into_response())
        }
        None => Err(AppError::NotFound("image".to_string(), filename).into()),
    }
}

// ── Message board ───────────────────────────────────────────────────────────

pub async fn chat_page(CurrentRole(role): CurrentRole) -> Result<Html<String>, PageError> {
    auth::authorize(role, auth::MESSAGE_VIEW)?;
    let page = ChatTemplate {
        can_moderate: role.can_moderate_messages(),
        can_clear: matches!(role, Role::Admin),
    };
    Ok(Html(page.render()?))
}

pub async fn list_messages(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
) -> Result<Json<Vec<Message>>, ApiError> {
    auth::authorize(role, auth::MESSAGE_VIEW)?;
    Ok(Json(state.messages.list().await?))
}

#[derive(Deserialize)]
pub struct PostMessageBody {
    #[serde(default)]
    author: Option<String>,
    text: Option<String>,
}

pub async fn post_message(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Json(body): Json<PostMessageBody>,
) -> Result<StatusCode, ApiError> {
    auth::authorize(role, auth::MESSAGE_POST)?;
    let text = body
        .text
        .ok_or_else(|| AppError::ValidationError("missing field: text".to_string()))?;
    state
        .messages
        .post(body.author.as_deref().unwrap_or(""), &text)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct DeleteMessageBody {
    id: Option<String>,
}

pub async fn delete_message(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
    Json(body): Json<DeleteMessageBody>,
) -> Result<StatusCode, ApiError> {
    auth::authorize(role, auth::MESSAGE_DELETE)?;
    let id = body
        .id
        .ok_or_else(|| AppError::ValidationError("missing field: id".to_string()))?;
    state.messages.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_messages(
    State(state): State<AppState>,
    CurrentRole(role): CurrentRole,
) -> Result<StatusCode, ApiError> {
    auth::authorize(role, auth::MESSAGE_CLEAR)?;
    state.messages.clear().await?;
    tracing::info!("message board cleared");
    Ok(StatusCode::NO_CONTENT)
}
