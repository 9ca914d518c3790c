//! Persisted session identifier and the key-value stores backing it.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use thiserror::Error;
use tracing::{debug, warn};

pub const SESSION_STORAGE_KEY: &str = "calculator_session_id";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Small string key-value persistence capability, the same shape as browser
/// local storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
}

#[derive(Default)]
pub struct InMemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let items = self.items.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut items = self.items.lock().map_err(|_| SessionStoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, re-read on every access so that several app
/// instances sharing a data directory see each other's writes.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(SessionStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "discarding unreadable session store: {err}"
                );
                Ok(HashMap::new())
            }
        }
    }

    fn save(&self, items: &HashMap<String, String>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionStoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = serde_json::to_string_pretty(items)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized).map_err(|source| SessionStoreError::Write {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| SessionStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }
}

fn random_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Resolves the session identifier once per process. The first successful
/// lookup is cached, so later requests do not touch the backing store.
#[derive(Clone)]
pub struct SessionIdProvider {
    store: Arc<dyn KeyValueStore>,
    generate: fn() -> String,
    cached: Arc<Mutex<Option<String>>>,
}

impl SessionIdProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_generator(store, random_session_id)
    }

    pub fn with_generator(store: Arc<dyn KeyValueStore>, generate: fn() -> String) -> Self {
        Self {
            store,
            generate,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the persisted identifier, creating and persisting one first if
    /// the store has none. An empty stored value counts as absent.
    pub fn get_or_create_session_id(&self) -> Result<String, SessionStoreError> {
        let mut cached = self.cached.lock().map_err(|_| SessionStoreError::Poisoned)?;
        if let Some(session_id) = cached.as_ref() {
            return Ok(session_id.clone());
        }

        let session_id = match self
            .store
            .get_item(SESSION_STORAGE_KEY)?
            .filter(|value| !value.is_empty())
        {
            Some(existing) => existing,
            None => {
                let created = (self.generate)();
                self.store.set_item(SESSION_STORAGE_KEY, &created)?;
                debug!(session_id = %created, "created calculator session id");
                created
            }
        };
        *cached = Some(session_id.clone());
        Ok(session_id)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
