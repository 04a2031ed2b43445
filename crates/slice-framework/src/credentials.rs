//! # Credential Store
//!
//! Every resource client reads the bearer token from a [`CredentialStore`] on each call.
//! Clients never write it; rotation and refresh are the host's concern.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;

/// Default key under which the session token is stored.
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";

/// Read-only access to the current bearer token.
pub trait CredentialStore: Send + Sync {
    /// The token, or `None` when no session exists.
    fn token(&self) -> Option<String>;
}

/// In-process token holder. The host sets it after login and clears it on logout.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .filter(|token| !token.is_empty())
    }
}

/// A JSON key-value file holding the session, keyed by a fixed name.
///
/// The file is re-read on every call so a login performed by another process is
/// picked up without restarting. A missing file, a missing key or an empty value all
/// mean "no token".
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
    key: String,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }
}

impl CredentialStore for FileCredentials {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let document: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable credentials file");
                return None;
            }
        };
        document
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .filter(|token| !token.is_empty())
    }
}
