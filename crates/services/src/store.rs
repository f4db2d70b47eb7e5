//! Shared plumbing for the on-disk stores.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure at a store boundary. Callers decide whether to ignore it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path:?} does not exist")]
    Missing { path: PathBuf },

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid contents in {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Overwrite `path`, creating its parent directory first.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
