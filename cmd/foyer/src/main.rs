//! # Foyer Binary
//!
//! The entry point that assembles the application: configuration,
//! filesystem adapters, session layer, and the axum router.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{build_router, AppState};
use auth_adapters::PasscodeAuthenticator;
use configs::AppConfig;
use domains::traits::{Authenticator, MediaStore, MessageRepo};
use services::messages::MessageService;
use storage_adapters::{JsonMessageStore, LocalMediaStore};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,foyer=debug")),
        )
        .init();

    let config = AppConfig::load().context("load configuration")?;
    let images_dir = config.images_dir();
    let messages_path = config.messages_path();

    tokio::fs::create_dir_all(&images_dir)
        .await
        .with_context(|| format!("create {}", images_dir.display()))?;

    let repo: Arc<dyn MessageRepo> = Arc::new(JsonMessageStore::new(messages_path));
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(images_dir));
    let auth: Arc<dyn Authenticator> = Arc::new(PasscodeAuthenticator::new(config.passcodes));

    let state = AppState {
        auth,
        media,
        messages: Arc::new(MessageService::new(repo)),
    };

    // Sessions live in memory: restarting the server logs everyone out,
    // which is fine for a single-node, shared-secret deployment.
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    let app = build_router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "foyer listening");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
