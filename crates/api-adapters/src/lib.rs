//! # api-adapters
//!
//! The web routing and orchestration layer for Foyer.

pub mod error;
pub mod handlers;
pub mod session;
pub mod state;
pub mod ui;

use axum::routing::{get, post};
use axum::Router;

pub use state::AppState;

/// Builds the full application router.
///
/// # Developer Note
/// The caller supplies the session layer (and any tracing layers) so
/// the binary and the test suite can configure their own stores.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Login and logout
        .route("/", get(handlers::login_page))
        .route("/login", post(handlers::login))
        .route("/logout", get(handlers::logout))
        // Galleries
        .route("/gallery", get(handlers::user_gallery))
        .route("/upload", post(handlers::upload_images))
        .route("/admin", get(handlers::admin_gallery))
        .route("/delete_image", post(handlers::delete_image))
        .route("/guest", get(handlers::guest_gallery))
        .route("/images/{filename}", get(handlers::get_image))
        // Message board
        .route("/chat", get(handlers::chat_page))
        .route(
            "/api/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
        .route("/api/messages/delete", post(handlers::delete_message))
        .route("/api/messages/clear", post(handlers::clear_messages))
        .with_state(state)
}
