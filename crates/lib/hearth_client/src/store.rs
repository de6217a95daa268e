//! Persisted session-token slot.
//!
//! Exactly one token is persisted at a time, last write wins. Persistence
//! sits behind [`TokenStore`] (the browser cookie jar, abstracted to a
//! single key-value slot); [`SessionStore`] couples that slot to the API
//! client's bearer header so the two can never drift apart.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::debug;

use hearth_core::error::AuthError;

use crate::http::ApiClient;

/// Name of the persisted token slot (the upstream cookie name).
pub const TOKEN_SLOT: &str = "session_token";

/// Single-slot key-value persistence for the raw bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, AuthError>;
    fn save(&self, token: &str) -> Result<(), AuthError>;
    fn remove(&self) -> Result<(), AuthError>;
}

/// File-backed token slot under the platform data directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Default slot: `<data dir>/hearth/session_token`.
    pub fn new() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hearth")
            .join(TOKEN_SLOT);
        Self { path }
    }

    /// Slot at an explicit path (tests, portable installs).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::Storage(format!("create {}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, token)
            .map_err(|e| AuthError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn remove(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(format!(
                "remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory token slot. Clones share the slot, so tests can keep a handle
/// and inspect it after handing the store to a session.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        Ok(self.slot.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Couples the persisted slot with the API client's bearer header.
///
/// All session writes go through here: [`SessionStore::set`] persists the
/// token and arms the `Authorization` default; [`SessionStore::clear`]
/// removes both.
pub struct SessionStore {
    store: Box<dyn TokenStore>,
    client: Arc<ApiClient>,
}

impl SessionStore {
    pub fn new(store: Box<dyn TokenStore>, client: Arc<ApiClient>) -> Self {
        Self { store, client }
    }

    /// Read the persisted token, if any. Idempotent.
    pub fn get(&self) -> Result<Option<String>, AuthError> {
        self.store.load()
    }

    /// Persist `token` and arm the `Authorization` header.
    pub fn set(&self, token: &str) -> Result<(), AuthError> {
        self.store.save(token)?;
        self.client.set_bearer(token);
        debug!("session token set");
        Ok(())
    }

    /// Remove the persisted token and the `Authorization` header.
    pub fn clear(&self) -> Result<(), AuthError> {
        // Disarm the header first so no request goes out with a token the
        // slot no longer holds.
        self.client.clear_bearer();
        self.store.remove()?;
        debug!("session token cleared");
        Ok(())
    }
}
