//! # Message Service
//!
//! Validation and record assembly for board messages. Length caps
//! truncate rather than reject; an empty text after trimming is the
//! only rejection. Ids and timestamps are assigned here so the store
//! only ever sees complete records.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::Message;
use domains::traits::MessageRepo;
use uuid::Uuid;

/// Maximum stored author length, in characters.
pub const AUTHOR_MAX: usize = 50;
/// Maximum stored text length, in characters.
pub const TEXT_MAX: usize = 2000;

pub struct MessageService {
    repo: Arc<dyn MessageRepo>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepo>) -> Self {
        Self { repo }
    }

    /// Ordered snapshot, newest first.
    pub async fn list(&self) -> Result<Vec<Message>> {
        self.repo.list().await
    }

    /// Validates, assembles, and stores a new message, returning the
    /// created record.
    pub async fn post(&self, author: &str, text: &str) -> Result<Message> {
        let author = truncate_chars(author.trim(), AUTHOR_MAX);
        let text = truncate_chars(text.trim(), TEXT_MAX);
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "message text must not be empty".to_string(),
            ));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            author,
            text,
            ts: Utc::now().timestamp(),
        };
        self.repo.append(message.clone()).await?;
        tracing::debug!(id = %message.id, "message stored");
        Ok(message)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.repo.clear().await
    }
}

/// Char-boundary-safe truncation.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
