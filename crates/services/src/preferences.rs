//! Remembers the last thinking mode between runs.

use crate::store::{read_file, write_file, StoreError};
use shared::ThinkingMode;
use std::path::{Path, PathBuf};

/// Single-value store holding the raw mode name.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: distinguishes a missing file from an unreadable one and
    /// from a value that is not a mode name.
    pub fn read(&self) -> Result<ThinkingMode, StoreError> {
        let raw = read_file(&self.path)?;
        raw.trim().parse().map_err(|e| StoreError::Invalid {
            path: self.path.clone(),
            reason: format!("{}", e),
        })
    }

    /// Stored mode, or [`ThinkingMode::Normal`] when nothing usable is stored.
    pub fn load(&self) -> ThinkingMode {
        match self.read() {
            Ok(mode) => mode,
            Err(e) if e.is_missing() => ThinkingMode::default(),
            Err(e) => {
                tracing::debug!("Falling back to default thinking mode: {}", e);
                ThinkingMode::default()
            }
        }
    }

    pub fn save(&self, mode: ThinkingMode) -> Result<(), StoreError> {
        write_file(&self.path, mode.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PreferenceStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp_dir.path().join(".thinking_mode_preference"));
        (temp_dir, store)
    }

    #[test]
    fn test_save_then_load_every_mode() {
        let (_temp_dir, store) = setup();
        for mode in ThinkingMode::ALL {
            store.save(mode).unwrap();
            assert_eq!(store.load(), mode);
        }
    }

    #[test]
    fn test_file_holds_raw_mode_name() {
        let (_temp_dir, store) = setup();
        store.save(ThinkingMode::Ultra).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "ultra");
    }

    #[test]
    fn test_missing_file_loads_normal() {
        let (_temp_dir, store) = setup();
        assert!(store.read().unwrap_err().is_missing());
        assert_eq!(store.load(), ThinkingMode::Normal);
    }

    #[test]
    fn test_corrupt_file_loads_normal() {
        let (_temp_dir, store) = setup();
        fs::write(store.path(), "turbo").unwrap();
        assert!(matches!(store.read(), Err(StoreError::Invalid { .. })));
        assert_eq!(store.load(), ThinkingMode::Normal);

        fs::write(store.path(), [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(store.load(), ThinkingMode::Normal);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let (_temp_dir, store) = setup();
        fs::write(store.path(), "deep\n").unwrap();
        assert_eq!(store.load(), ThinkingMode::Deep);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp_dir.path().join("nested/dir/pref"));
        store.save(ThinkingMode::Quick).unwrap();
        assert_eq!(store.load(), ThinkingMode::Quick);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        // The target path is an existing directory, so the write must fail.
        let store = PreferenceStore::new(temp_dir.path());
        assert!(matches!(
            store.save(ThinkingMode::Deep),
            Err(StoreError::Io { .. })
        ));
    }
}
