//! # Configs
//!
//! Environment-driven application configuration. All settings use the
//! `FOYER_` prefix; a `.env` file is honored when present. Passcodes
//! are wrapped in `SecretString` so they never leak through `Debug`
//! output or logs.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// One optional shared secret per role. A missing secret makes the
/// role unreachable: it can never match a submitted passcode.
#[derive(Debug, Default)]
pub struct Passcodes {
    pub admin: Option<SecretString>,
    pub user: Option<SecretString>,
    pub guest: Option<SecretString>,
    pub chat: Option<SecretString>,
    pub moderator: Option<SecretString>,
}

impl Passcodes {
    pub fn is_empty(&self) -> bool {
        self.admin.is_none()
            && self.user.is_none()
            && self.guest.is_none()
            && self.chat.is_none()
            && self.moderator.is_none()
    }
}

#[derive(Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub passcodes: Passcodes,
}

/// Flat env-variable shape: `FOYER_BIND_ADDR`, `FOYER_DATA_DIR`,
/// `FOYER_PASSCODE_<ROLE>`.
#[derive(Deserialize)]
struct RawConfig {
    bind_addr: Option<String>,
    data_dir: Option<PathBuf>,
    passcode_admin: Option<SecretString>,
    passcode_user: Option<SecretString>,
    passcode_guest: Option<SecretString>,
    passcode_chat: Option<SecretString>,
    passcode_moderator: Option<SecretString>,
}

impl AppConfig {
    /// Reads `FOYER_*` environment variables, loading `.env` first
    /// when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let raw: RawConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("FOYER"))
            .build()?
            .try_deserialize()?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let passcodes = Passcodes {
            admin: raw.passcode_admin,
            user: raw.passcode_user,
            guest: raw.passcode_guest,
            chat: raw.passcode_chat,
            moderator: raw.passcode_moderator,
        };
        if passcodes.is_empty() {
            tracing::warn!("no passcodes configured, every login will be rejected");
        }
        Self {
            bind_addr: raw
                .bind_addr
                .unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            data_dir: raw.data_dir.unwrap_or_else(|| PathBuf::from("./data")),
            passcodes,
        }
    }

    /// Path of the flat-file message document.
    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.json")
    }

    /// Directory holding uploaded images.
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}
