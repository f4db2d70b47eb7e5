//! Bounded log of past responses, newest first.
//!
//! The whole log lives in one pretty-printed JSON array. It is read once
//! when the store is opened and rewritten on every change.

use crate::store::{read_file, write_file, StoreError};
use shared::{ResponseRecord, ThinkingMode};
use std::path::{Path, PathBuf};

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    limit: usize,
    entries: Vec<ResponseRecord>,
}

impl HistoryStore {
    /// Open the log at `path`. Any read or parse failure yields an empty log.
    pub fn open(path: impl Into<PathBuf>, limit: usize) -> Self {
        let path = path.into();
        let mut entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) if e.is_missing() => Vec::new(),
            Err(e) => {
                tracing::debug!("Starting with empty history: {}", e);
                Vec::new()
            }
        };
        entries.truncate(limit);
        Self {
            path,
            limit,
            entries,
        }
    }

    /// Strict read of the persisted entries.
    pub fn read_entries(path: &Path) -> Result<Vec<ResponseRecord>, StoreError> {
        let content = read_file(path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn entries(&self) -> &[ResponseRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a response at the front of the log and persist it. The
    /// in-memory log is updated even when the write fails.
    pub fn append(
        &mut self,
        response: &str,
        context: &str,
        mode: ThinkingMode,
    ) -> Result<(), StoreError> {
        self.entries
            .insert(0, ResponseRecord::new(response, context, mode));
        self.entries.truncate(self.limit);
        self.persist()
    }

    /// Up to `count` of the newest entries.
    pub fn recent(&self, count: usize) -> &[ResponseRecord] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| StoreError::Invalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        write_file(&self.path, &json)
    }
}
