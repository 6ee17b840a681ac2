//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;

use crate::error::Result;
use crate::models::{ImageEntry, Message, Role};

/// Durable storage contract for board messages.
///
/// Implementations serialize all calls internally: concurrent callers
/// observe whole operations, never interleaved partial writes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MessageRepo: Send + Sync {
    /// Ordered snapshot, newest first. Records lacking an id are
    /// repaired and persisted before being returned.
    async fn list(&self) -> Result<Vec<Message>>;

    /// Appends a fully validated record and persists the collection.
    async fn append(&self, message: Message) -> Result<()>;

    /// Removes the record with the given id; `NotFound` if absent, in
    /// which case the stored collection is unchanged.
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Replaces the whole collection with empty and persists.
    async fn clear(&self) -> Result<()>;
}

/// Image storage contract for uploads and gallery listings.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Saves the upload under a collision-free name derived from the
    /// client filename and returns the stored name.
    async fn save(&self, original_name: &str, data: Bytes) -> Result<String>;

    /// Entries sorted by creation time, newest first.
    async fn list(&self) -> Result<Vec<ImageEntry>>;

    /// Raw bytes plus guessed content type; `None` when absent.
    async fn read(&self, filename: &str) -> Result<Option<(Bytes, Mime)>>;

    /// Deletes by filename; `NotFound` if absent.
    async fn delete(&self, filename: &str) -> Result<()>;
}

/// Maps a submitted passcode to the role it unlocks.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Authenticator: Send + Sync {
    /// First configured secret that matches wins; `None` leaves any
    /// existing session state untouched.
    fn authenticate(&self, submitted: &str) -> Option<Role>;
}
