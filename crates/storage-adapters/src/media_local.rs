//! # LocalMediaStore
//!
//! Local filesystem implementation of `MediaStore`. Uploads keep their
//! client filename where possible; collisions get a numeric suffix
//! before the extension (`cat.png`, `cat-1.png`, …).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use domains::error::{AppError, Result};
use domains::models::ImageEntry;
use domains::traits::MediaStore;
use mime::Mime;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g. "./data/images").
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn internal(&self, what: &str, err: impl std::fmt::Display) -> AppError {
        AppError::Internal(format!("{what} under {}: {err}", self.root.display()))
    }
}

/// Filenames arriving from the outside must stay inside the images
/// directory.
fn check_filename(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(AppError::ValidationError(format!(
            "invalid filename: {name}"
        )));
    }
    Ok(())
}

/// Splits "cat.png" into ("cat", "png"); files without an extension
/// keep an empty one.
fn split_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, original_name: &str, data: Bytes) -> Result<String> {
        // Strip any directory components a client may have sent along.
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::ValidationError(format!("invalid upload filename: {original_name}"))
            })?;
        check_filename(base)?;

        let guessed = mime_guess::from_path(base).first_or_octet_stream();
        if guessed.type_() != mime::IMAGE {
            return Err(AppError::ValidationError(format!(
                "{base} is not an image"
            )));
        }

        let (stem, ext) = split_name(base);
        let mut attempt = 0u32;
        loop {
            let candidate = match (attempt, ext.is_empty()) {
                (0, _) => base.to_string(),
                (n, true) => format!("{stem}-{n}"),
                (n, false) => format!("{stem}-{n}.{ext}"),
            };
            let path = self.root.join(&candidate);
            // create_new makes the collision check and the claim one
            // atomic step, so two concurrent uploads of "cat.png"
            // cannot both win the same name.
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&data)
                        .await
                        .map_err(|err| self.internal("write upload", err))?;
                    tracing::debug!(filename = %candidate, bytes = data.len(), "image stored");
                    return Ok(candidate);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(err) => return Err(self.internal("create upload", err)),
            }
        }
    }

    async fn list(&self) -> Result<Vec<ImageEntry>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.internal("list images", err)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|err| self.internal("list images", err))?
        {
            let meta = entry
                .metadata()
                .await
                .map_err(|err| self.internal("stat image", err))?;
            if !meta.is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // Creation time is unsupported on some filesystems; fall
            // back to mtime rather than dropping the entry.
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            entries.push(ImageEntry { filename, created });
        }
        entries.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(entries)
    }

    async fn read(&self, filename: &str) -> Result<Option<(Bytes, Mime)>> {
        check_filename(filename)?;
        match fs::read(self.root.join(filename)).await {
            Ok(data) => {
                let mime = mime_guess::from_path(filename).first_or_octet_stream();
                Ok(Some((Bytes::from(data), mime)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.internal("read image", err)),
        }
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        check_filename(filename)?;
        match fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound("image".to_string(), filename.to_string()))
            }
            Err(err) => Err(self.internal("delete image", err)),
        }
    }
}
