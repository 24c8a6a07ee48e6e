//! Credential storage and identity extraction.
//!
//! The bearer token lives behind a [`CredentialStore`] so commands never touch
//! the durable file directly. Tests swap in [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Key under which the token is persisted.
pub const CREDENTIAL_KEY: &str = "accessToken";

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn claims(&self) -> Option<Claims> {
        let payload = self.0.split('.').nth(1)?;
        let payload = payload.trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The subset of the token payload we read for display.
#[derive(Deserialize, Debug, Default)]
pub struct Claims {
    pub sub: Option<String>,
    pub exp: Option<i64>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

pub trait CredentialStore {
    fn load(&self) -> Option<Credential>;
    fn save(&self, credential: &Credential) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON key-value file in the config directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("session.json")))
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                HashMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<()> {
        let write_err = |e| AppError::SessionWrite {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(&self.path, contents).map_err(write_err)
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Option<Credential> {
        self.read_entries()
            .remove(CREDENTIAL_KEY)
            .filter(|token| !token.is_empty())
            .map(Credential::new)
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let mut entries = self.read_entries();
        entries.insert(CREDENTIAL_KEY.to_string(), credential.secret().to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries();
        if entries.remove(CREDENTIAL_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// Process-local store, used for `INNO_TOKEN` and in tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<Credential>>,
}

impl MemoryStore {
    pub fn with(credential: Credential) -> Self {
        Self {
            slot: RefCell::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<Credential> {
        self.slot.borrow().clone()
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        *self.slot.borrow_mut() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

pub struct Session {
    store: Box<dyn CredentialStore>,
}

impl Session {
    pub fn new(store: impl CredentialStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Session with no stored credential.
    #[cfg(test)]
    pub fn anonymous() -> Self {
        Self::new(MemoryStore::default())
    }

    pub fn credential(&self) -> Option<Credential> {
        self.store.load()
    }

    /// Email carried in the token's `sub` claim, if it can be decoded.
    pub fn identity_claim(&self) -> Option<String> {
        self.credential()?.claims()?.sub
    }

    pub fn store(&self, credential: &Credential) -> Result<()> {
        self.store.save(credential)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
