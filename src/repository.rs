//! Task Repository
//!
//! Load/save of the whole task list under a single storage key.
//! Loading never fails: a missing or corrupt value reads as an empty list,
//! and a single malformed record is dropped without losing the rest.

use std::sync::Arc;

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde_json::Value;

use crate::error::TaskResult;
use crate::models::StoredTask;

/// Persistence for the ordered task list
pub trait TaskRepository: Send + Sync {
    /// Stored records in order, or an empty list if nothing usable is stored
    fn load(&self) -> Vec<StoredTask>;

    /// Replace whatever was stored with `tasks`
    fn save(&self, tasks: &[StoredTask]) -> TaskResult<()>;
}

/// Repository handle shared through the app context
pub type SharedRepository = Arc<dyn TaskRepository>;

/// Turn the result of reading the storage key into task records.
pub fn decode_stored(key: &str, raw: Result<Vec<Value>, StorageError>) -> Vec<StoredTask> {
    let values = match raw {
        Ok(values) => values,
        Err(StorageError::KeyNotFound(_)) => return Vec::new(),
        Err(e) => {
            log::warn!("[STORE] ignoring unreadable '{}': {}", key, e);
            return Vec::new();
        }
    };
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<StoredTask>(value) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("[STORE] skipping malformed task #{} in '{}': {}", index, key, e);
                None
            }
        })
        .collect()
}

/// `window.localStorage` backed repository
#[derive(Debug, Clone, Copy)]
pub struct BrowserTaskRepository {
    key: &'static str,
}

impl BrowserTaskRepository {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TaskRepository for BrowserTaskRepository {
    fn load(&self) -> Vec<StoredTask> {
        let tasks = decode_stored(self.key, LocalStorage::get::<Vec<Value>>(self.key));
        log::info!("[STORE] loaded {} tasks from '{}'", tasks.len(), self.key);
        tasks
    }

    fn save(&self, tasks: &[StoredTask]) -> TaskResult<()> {
        LocalStorage::set(self.key, tasks)?;
        log::debug!("[STORE] saved {} tasks", tasks.len());
        Ok(())
    }
}

/// In-memory repository holding the raw serialized value
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    raw: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTaskRepository {
    const KEY: &'static str = "tasks";

    pub fn with_raw(raw: &str) -> Self {
        Self { raw: std::sync::Mutex::new(Some(raw.to_string())) }
    }

    /// The stored value, exactly as written
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().unwrap().clone()
    }

    /// The stored value parsed as JSON
    pub fn json(&self) -> Value {
        self.raw().map(|raw| serde_json::from_str(&raw).unwrap()).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
impl TaskRepository for MemoryTaskRepository {
    fn load(&self) -> Vec<StoredTask> {
        let raw = match self.raw() {
            Some(raw) => serde_json::from_str::<Vec<Value>>(&raw).map_err(StorageError::SerdeError),
            None => Err(StorageError::KeyNotFound(Self::KEY.to_string())),
        };
        decode_stored(Self::KEY, raw)
    }

    fn save(&self, tasks: &[StoredTask]) -> TaskResult<()> {
        *self.raw.lock().unwrap() = Some(serde_json::to_string(tasks)?);
        Ok(())
    }
}
