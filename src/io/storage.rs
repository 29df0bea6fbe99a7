use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::io::recovery;
use crate::model::Task;

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("stored tasks are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for the task list. Backends are synchronous; absent
/// data loads as an empty list, never as an error.
pub trait Storage {
    /// Read the persisted list, newest first.
    fn load(&self) -> Result<Vec<Task>, StorageError>;
    /// Replace the persisted list with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// JSON file backend
// ---------------------------------------------------------------------------

/// File-backed storage: one pretty-printed JSON array per data file,
/// written atomically. A failed write lands the payload in the recovery
/// log next to the data file before the error is reported.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn data_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;
        // First save may predate the data directory
        let result = fs::create_dir_all(self.data_dir())
            .and_then(|_| recovery::atomic_write(&self.path, json.as_bytes()));
        if let Err(e) = result {
            recovery::log_unsaved_tasks(self.data_dir(), &json, &e.to_string());
            return Err(StorageError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Single-slot in-memory backend. Clones share the slot, so tests can hold
/// one handle for inspection while the store owns another. Writes can be
/// switched to fail to exercise degraded persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Seed the slot with a raw payload, valid JSON or not.
    pub fn set_raw(&self, payload: impl Into<String>) {
        *self.slot.borrow_mut() = Some(payload.into());
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        match self.slot.borrow().as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        if *self.fail_writes.borrow() {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        *self.slot.borrow_mut() = Some(serde_json::to_string(tasks)?);
        Ok(())
    }
}
