use crate::error::HostError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// Descriptive metadata stored alongside a registered file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub source: String,
    pub title: String,
    pub content_type: String,
    pub size: u64,
    pub path: String,
}

/// A file known to the host's registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub user_id: String,
    /// Registry key, `<directory>/<user_id>/<name>`.
    pub filename: String,
    pub meta: FileMeta,
}

/// The host's file storage, reduced to what the embed action needs.
pub trait FileRegistry: Send + Sync {
    /// All files owned by `user_id`.
    fn files_for_user(&self, user_id: &str) -> Result<Vec<FileRecord>, HostError>;

    /// Writes `content` at `path`, replacing anything already there.
    /// Returns the number of bytes written.
    fn write_content(&self, path: &str, content: &str) -> Result<u64, HostError>;

    /// Registers a new file and returns the stored record with its assigned id.
    fn insert(&self, user_id: &str, filename: &str, meta: FileMeta)
    -> Result<FileRecord, HostError>;
}

#[derive(Default)]
struct MemoryState {
    records: Vec<FileRecord>,
    contents: AHashMap<String, String>,
    next_id: u64,
}

/// A `FileRegistry` that keeps everything in memory.
#[derive(Default)]
pub struct MemoryFileRegistry {
    state: Mutex<MemoryState>,
}

impl MemoryFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content currently stored at `path`.
    pub fn content(&self, path: &str) -> Option<String> {
        self.lock().ok()?.contents.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|state| state.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, HostError> {
        self.state
            .lock()
            .map_err(|_| HostError::Storage("registry lock poisoned".to_string()))
    }
}

impl FileRegistry for MemoryFileRegistry {
    fn files_for_user(&self, user_id: &str) -> Result<Vec<FileRecord>, HostError> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    fn write_content(&self, path: &str, content: &str) -> Result<u64, HostError> {
        let mut state = self.lock()?;
        state.contents.insert(path.to_string(), content.to_string());
        Ok(content.len() as u64)
    }

    fn insert(
        &self,
        user_id: &str,
        filename: &str,
        meta: FileMeta,
    ) -> Result<FileRecord, HostError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let record = FileRecord {
            id: format!("file-{:08}", state.next_id),
            user_id: user_id.to_string(),
            filename: filename.to_string(),
            meta,
        };
        state.records.push(record.clone());
        Ok(record)
    }
}
