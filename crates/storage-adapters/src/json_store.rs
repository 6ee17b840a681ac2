//! # JsonMessageStore
//!
//! `MessageRepo` backed by a single JSON document. Every operation
//! takes the store-wide lock for its whole load-mutate-save cycle, so
//! concurrent requests observe serialized operations with no lost
//! updates or interleaved partial writes. A missing or unreadable
//! document reads as an empty collection; a failed write is a hard
//! error.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use domains::error::{AppError, Result};
use domains::models::Message;
use domains::traits::MessageRepo;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

/// On-disk record. `id` is optional because documents written before
/// ids existed must still be read, then repaired in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMessage {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    author: String,
    text: String,
    ts: i64,
}

impl StoredMessage {
    fn from_domain(message: Message) -> Self {
        Self {
            id: Some(message.id),
            author: message.author,
            text: message.text,
            ts: message.ts,
        }
    }
}

pub struct JsonMessageStore {
    path: PathBuf,
    /// Held across every load-mutate-save cycle. Deliberately coarse:
    /// the whole store serializes behind it.
    lock: Mutex<()>,
}

impl JsonMessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads the document. Absence reads as empty; an unparsable file
    /// also reads as empty but is logged, since it means the document
    /// was corrupted externally.
    async fn load(&self) -> Vec<StoredMessage> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "message document unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(messages) => messages,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "message document corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Whole-document rewrite via a sibling temp file and rename, so a
    /// crash mid-write never leaves a truncated document behind.
    async fn save(&self, messages: &[StoredMessage]) -> Result<()> {
        let body = serde_json::to_vec_pretty(messages)
            .map_err(|err| AppError::Internal(format!("encode message document: {err}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &body)
            .await
            .map_err(|err| AppError::Internal(format!("write {}: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| AppError::Internal(format!("replace {}: {err}", self.path.display())))?;
        Ok(())
    }

    /// Assigns fresh ids to legacy records. Returns whether anything
    /// changed and therefore needs persisting.
    fn ensure_ids(messages: &mut [StoredMessage]) -> bool {
        let mut changed = false;
        for message in messages.iter_mut() {
            if message.id.is_none() {
                message.id = Some(Uuid::new_v4().to_string());
                changed = true;
            }
        }
        changed
    }
}

#[async_trait]
impl MessageRepo for JsonMessageStore {
    async fn list(&self) -> Result<Vec<Message>> {
        let _guard = self.lock.lock().await;
        let mut stored = self.load().await;
        if Self::ensure_ids(&mut stored) {
            // Repaired ids must be durable before they are served, so
            // a second read returns the same ids.
            self.save(&stored).await?;
        }

        let mut messages: Vec<Message> = stored
            .into_iter()
            .filter_map(|m| {
                let id = m.id?;
                Some(Message {
                    id,
                    author: m.author,
                    text: m.text,
                    ts: m.ts,
                })
            })
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        messages.sort_by(|a, b| b.ts.cmp(&a.ts));
        Ok(messages)
    }

    async fn append(&self, message: Message) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut stored = self.load().await;
        Self::ensure_ids(&mut stored);
        stored.push(StoredMessage::from_domain(message));
        self.save(&stored).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut stored = self.load().await;
        Self::ensure_ids(&mut stored);
        match stored.iter().position(|m| m.id.as_deref() == Some(id)) {
            Some(index) => {
                stored.remove(index);
                self.save(&stored).await
            }
            None => Err(AppError::NotFound("message".to_string(), id.to_string())),
        }
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.save(&[]).await
    }
}
