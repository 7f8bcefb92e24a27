//! Durable session token storage.
//!
//! Exactly one value is persisted by the whole client: the bearer token,
//! stored under a fixed path in the OS data directory. Reads are served
//! from an in-memory mirror; persistence failures are logged and swallowed
//! so an unwritable disk degrades to a session-only token.

use std::path::PathBuf;
use std::sync::Mutex;

use operis_core::{ClientError, ClientResult};

/// Stored token file: `{data_dir}/operis/token`.
fn token_path() -> ClientResult<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or_else(|| ClientError::config("failed to resolve OS app data directory"))?;

    let mut dir = base;
    dir.push("operis");
    std::fs::create_dir_all(&dir)
        .map_err(|e| ClientError::config(format!("failed to create {dir:?}: {e}")))?;

    dir.push("token");
    Ok(dir)
}

/// Holder of the single shared session token.
///
/// A 401-triggered [`clear`](TokenStore::clear) and a concurrent login's
/// [`set`](TokenStore::set) are last-writer-wins; the mutex only keeps each
/// individual read/write atomic.
#[derive(Debug)]
pub struct TokenStore {
    path: Option<PathBuf>,
    token: Mutex<Option<String>>,
}

impl TokenStore {
    /// Open the durable store, loading any previously persisted token.
    ///
    /// Falls back to an in-memory store when the data directory cannot be
    /// resolved.
    pub fn open() -> Self {
        match token_path() {
            Ok(path) => {
                let token = match std::fs::read_to_string(&path) {
                    Ok(raw) => {
                        let trimmed = raw.trim();
                        (!trimmed.is_empty()).then(|| trimmed.to_string())
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        tracing::warn!("failed to read persisted token: {e}");
                        None
                    }
                };
                Self {
                    path: Some(path),
                    token: Mutex::new(token),
                }
            }
            Err(e) => {
                tracing::warn!("token store degraded to in-memory: {e}");
                Self::in_memory()
            }
        }
    }

    /// Durable store at an explicit path (tests, sandboxed environments).
    pub fn at_path(path: PathBuf) -> Self {
        let token = std::fs::read_to_string(&path)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            path: Some(path),
            token: Mutex::new(token),
        }
    }

    /// Store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: Mutex::new(None),
        }
    }

    /// Token presence is the client's definition of "authenticated".
    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn set(&self, token: &str) {
        *self.lock() = Some(token.to_string());
        if let Some(path) = &self.path {
            if let Err(e) = std::fs::write(path, token) {
                tracing::warn!("failed to persist token: {e}");
            }
        }
    }

    pub fn clear(&self) {
        *self.lock() = None;
        if let Some(path) = &self.path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("failed to remove persisted token: {e}");
                }
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}
