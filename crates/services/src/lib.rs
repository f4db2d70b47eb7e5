//! Persistence and the request/response exchange behind the dialog.

pub mod history;
pub mod paths;
pub mod preferences;
pub mod session;
pub mod store;

pub use history::HistoryStore;
pub use paths::DataPaths;
pub use preferences::PreferenceStore;
pub use session::{DialogSession, SessionError, SessionState};
pub use store::StoreError;

use shared::settings::DialogSettings;
use shared::DecisionRequest;

/// Open both stores under `paths` and start a session for `request`.
pub fn open_session(
    request: DecisionRequest,
    paths: &DataPaths,
    settings: &DialogSettings,
) -> DialogSession {
    let preferences = PreferenceStore::new(paths.preference_file());
    let history = HistoryStore::open(paths.history_file(), settings.history_limit);
    DialogSession::open(request, preferences, history)
}
