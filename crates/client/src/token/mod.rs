//! Credential storage
//!
//! The bearer credential is a scoped resource: acquired on login, attached
//! to every outgoing call, released on logout or on any authorization
//! failure from the collaborator. The file-backed store keeps a small JSON
//! object under the fixed `authToken` key, mirroring the browser-local
//! storage the platform's web client uses.

use noteshare_core::errors::{AppError, Result};
use noteshare_core::TOKEN_STORAGE_KEY;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage for the opaque bearer credential
pub trait TokenStore: Send + Sync {
    /// Read the stored credential, if any
    fn load(&self) -> Result<Option<String>>;

    /// Persist a credential, replacing any previous one
    fn save(&self, token: &str) -> Result<()>;

    /// Discard the stored credential
    fn clear(&self) -> Result<()>;
}

/// File-backed store under a fixed key
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Storage {
                message: format!("credential file {} is not a JSON object", self.path.display()),
            }),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let raw = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map
            .get(TOKEN_STORAGE_KEY)
            .and_then(|v| v.as_str())
            .map(String::from))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(TOKEN_STORAGE_KEY.to_string(), Value::String(token.into()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_STORAGE_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .read()
            .map_err(|_| AppError::Storage {
                message: "token store lock poisoned".to_string(),
            })?
            .clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.write().map_err(|_| AppError::Storage {
            message: "token store lock poisoned".to_string(),
        })? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().map_err(|_| AppError::Storage {
            message: "token store lock poisoned".to_string(),
        })? = None;
        Ok(())
    }
}
