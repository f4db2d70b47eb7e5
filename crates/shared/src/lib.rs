pub mod mode;
pub mod outcome;
pub mod record;
pub mod request;

pub use mode::ThinkingMode;
pub use outcome::{DialogOutcome, OutputFormat};
pub use record::ResponseRecord;
pub use request::{DecisionRequest, RequestError};

pub mod settings {
    use serde::{Deserialize, Serialize};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn default_history_limit() -> usize {
        10
    }

    fn default_recent_limit() -> usize {
        5
    }

    /// Which presentation layer shows the prompt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum FrontendKind {
        /// Native window
        #[default]
        Window,
        /// Page served on a loopback port and opened in the default browser
        Web,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DialogSettings {
        /// Maximum number of responses kept in the history file
        #[serde(default = "default_history_limit")]
        pub history_limit: usize,
        /// How many past responses the "Recent" list offers
        #[serde(default = "default_recent_limit")]
        pub recent_limit: usize,
        #[serde(default)]
        pub frontend: FrontendKind,
        /// Where the preference and history files live
        #[serde(default)]
        pub data_dir: Option<PathBuf>,
    }

    impl Default for DialogSettings {
        fn default() -> Self {
            Self {
                history_limit: default_history_limit(),
                recent_limit: default_recent_limit(),
                frontend: FrontendKind::default(),
                data_dir: None,
            }
        }
    }

    impl DialogSettings {
        /// Read settings from `path`. A missing or unreadable file gives the defaults.
        pub fn load_from(path: &Path) -> Self {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(_) => return Self::default(),
            };
            match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring invalid settings file {:?}: {}", path, e);
                    Self::default()
                }
            }
        }

        /// Read settings from the platform config directory.
        pub fn load() -> Self {
            config_path()
                .map(|p| Self::load_from(&p))
                .unwrap_or_default()
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com.local", "Pause Dialog", "PauseDialog")
            .map(|proj| proj.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("settings.json"))
    }

}
