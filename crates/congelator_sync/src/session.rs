//! Session configuration and its persistence.
//!
//! A session is the (credential, document id) pair naming one remote
//! document. [`SessionContext`] is the only holder of the current value and
//! writes every change through to a [`ConfigStore`].

use crate::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Fixed key under which the session record is persisted.
pub const CONFIG_KEY: &str = "congelator_storage_config";

/// Credential and document identifier for one remote document.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Write credential.
    #[serde(alias = "apiKey")]
    pub credential: String,
    /// Remote document identifier.
    #[serde(alias = "binId")]
    pub document_id: String,
}

impl SessionConfig {
    /// Creates a configuration, rejecting blank fields.
    pub fn new(credential: impl Into<String>, document_id: impl Into<String>) -> SyncResult<Self> {
        let config = Self {
            credential: credential.into().trim().to_string(),
            document_id: document_id.into().trim().to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that neither field is blank.
    pub fn validate(&self) -> SyncResult<()> {
        if self.credential.trim().is_empty() {
            return Err(SyncError::InvalidInput("credential must not be empty".into()));
        }
        if self.document_id.trim().is_empty() {
            return Err(SyncError::InvalidInput("document id must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("credential", &"***")
            .field("document_id", &self.document_id)
            .finish()
    }
}

/// Persistence for the session record.
pub trait ConfigStore: Send {
    /// Reads the stored record, if any.
    fn load(&self) -> SyncResult<Option<SessionConfig>>;

    /// Stores `config`, replacing any previous record.
    fn save(&self, config: &SessionConfig) -> SyncResult<()>;

    /// Deletes the stored record. Deleting nothing is not an error.
    fn remove(&self) -> SyncResult<()>;
}

/// [`ConfigStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Uses the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<dir>/congelator_storage_config.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{CONFIG_KEY}.json")))
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> SyncResult<Option<SessionConfig>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(&self.path, e)),
        };
        let config: SessionConfig = serde_json::from_str(&raw).map_err(|e| {
            SyncError::ConfigStore(format!("{}: {e}", self.path.display()))
        })?;
        config.validate()?;
        Ok(Some(config))
    }

    fn save(&self, config: &SessionConfig) -> SyncResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| SyncError::ConfigStore(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| store_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| store_error(&self.path, e))?;
        debug!(path = %self.path.display(), "session config saved");
        Ok(())
    }

    fn remove(&self) -> SyncResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(&self.path, e)),
        }
    }
}

fn store_error(path: &Path, err: io::Error) -> SyncError {
    SyncError::ConfigStore(format!("{}: {err}", path.display()))
}

/// In-memory [`ConfigStore`]. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    slot: Arc<Mutex<Option<SessionConfig>>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `config`.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(config))),
        }
    }

    /// Returns the stored record.
    pub fn stored(&self) -> Option<SessionConfig> {
        self.slot.lock().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> SyncResult<Option<SessionConfig>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, config: &SessionConfig) -> SyncResult<()> {
        *self.slot.lock() = Some(config.clone());
        Ok(())
    }

    fn remove(&self) -> SyncResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// Holder of the current session configuration.
pub struct SessionContext {
    current: Option<SessionConfig>,
    store: Box<dyn ConfigStore>,
}

impl SessionContext {
    /// Reads the stored record once.
    pub fn load(store: Box<dyn ConfigStore>) -> SyncResult<Self> {
        let current = store.load()?;
        Ok(Self { current, store })
    }

    /// Creates a context over a fresh [`MemoryConfigStore`].
    pub fn in_memory(config: Option<SessionConfig>) -> Self {
        let store = match config.clone() {
            Some(config) => MemoryConfigStore::with_config(config),
            None => MemoryConfigStore::new(),
        };
        Self {
            current: config,
            store: Box::new(store),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> Option<&SessionConfig> {
        self.current.as_ref()
    }

    /// Returns true if a configuration is set.
    pub fn is_configured(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the whole configuration, starting a new session.
    pub fn set(&mut self, config: SessionConfig) -> SyncResult<()> {
        config.validate()?;
        self.store.save(&config)?;
        self.current = Some(config);
        Ok(())
    }

    /// Discards the configuration.
    ///
    /// The in-memory value is dropped even if the store fails.
    pub fn clear(&mut self) -> SyncResult<()> {
        self.current = None;
        self.store.remove()
    }

    /// Rotates the credential, keeping the document id.
    pub fn replace_credential(&mut self, credential: &str) -> SyncResult<()> {
        let current = self.current.as_ref().ok_or(SyncError::NotConfigured)?;
        let updated = SessionConfig::new(credential, current.document_id.clone())?;
        self.store.save(&updated)?;
        self.current = Some(updated);
        Ok(())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
