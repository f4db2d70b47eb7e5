//! Where the preference and history files live.

use shared::settings::{self, DialogSettings};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PAUSE_DIALOG_HOME";

const PREFERENCE_FILE: &str = ".thinking_mode_preference";
const HISTORY_FILE: &str = ".dialog_history.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Pick the data directory. First match wins: the explicit override,
    /// `PAUSE_DIALOG_HOME`, the settings file, the platform config
    /// directory, the directory holding the executable.
    pub fn resolve(explicit: Option<PathBuf>, settings: &DialogSettings) -> Self {
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let dir = explicit
            .or(env_dir)
            .or_else(|| settings.data_dir.clone())
            .or_else(settings::config_dir)
            .or_else(executable_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!("Using data directory {:?}", dir);
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn preference_file(&self) -> PathBuf {
        self.dir.join(PREFERENCE_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
