//! The request/response exchange shared by every front-end.
//!
//! A [`DialogSession`] owns the request, the operator's in-progress answer
//! and both stores. Front-ends only forward input to it and ask it to
//! submit or cancel; persistence happens here, once, on submit.
//!
//! States: `Open -> {Submitting, Cancelling} -> Closed`. Input is only
//! accepted while `Open`. `Submitting` and `Cancelling` last for the
//! duration of a single `submit` or `cancel` call.

use crate::history::HistoryStore;
use crate::preferences::PreferenceStore;
use shared::outcome::CANCELLED_TOKEN;
use shared::{DecisionRequest, DialogOutcome, ResponseRecord, ThinkingMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Submitting,
    Cancelling,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("The dialog is already closed")]
    Closed,

    #[error("No option numbered {number} ({available} available)")]
    NoSuchOption { number: usize, available: usize },
}

pub struct DialogSession {
    request: DecisionRequest,
    response: String,
    mode: ThinkingMode,
    state: SessionState,
    preferences: PreferenceStore,
    history: HistoryStore,
}

impl DialogSession {
    /// Start a session: the response is pre-filled with the default action
    /// and the mode comes from the stored preference.
    pub fn open(
        request: DecisionRequest,
        preferences: PreferenceStore,
        history: HistoryStore,
    ) -> Self {
        let mode = preferences.load();
        Self {
            response: request.default_action.clone(),
            request,
            mode,
            state: SessionState::Open,
            preferences,
            history,
        }
    }

    pub fn request(&self) -> &DecisionRequest {
        &self.request
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn mode(&self) -> ThinkingMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Past responses offered for re-use, newest first.
    pub fn recent_responses(&self, count: usize) -> &[ResponseRecord] {
        self.history.recent(count)
    }

    pub fn set_response(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.response = text.into();
        Ok(())
    }

    /// Replace the response with option `number` (1-based, as displayed).
    pub fn select_option(&mut self, number: usize) -> Result<(), SessionError> {
        self.ensure_open()?;
        let option = self
            .request
            .option(number)
            .ok_or(SessionError::NoSuchOption {
                number,
                available: self.request.options.len(),
            })?;
        self.response = option.to_string();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ThinkingMode) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.mode = mode;
        Ok(())
    }

    /// Finish with the current response and mode.
    ///
    /// The mode is always saved; the response goes to history unless it is
    /// empty or the cancellation token. Store failures are logged and
    /// otherwise ignored.
    pub fn submit(&mut self) -> Result<DialogOutcome, SessionError> {
        self.ensure_open()?;
        self.transition(SessionState::Submitting);

        if let Err(e) = self.preferences.save(self.mode) {
            tracing::warn!("Could not save thinking mode preference: {}", e);
        }

        if should_record(&self.response) {
            if let Err(e) =
                self.history
                    .append(&self.response, &self.request.decision_context, self.mode)
            {
                tracing::warn!("Could not save response history: {}", e);
            }
        }

        self.transition(SessionState::Closed);
        tracing::info!(mode = %self.mode, "Decision submitted");
        Ok(DialogOutcome::Submitted {
            response: self.response.clone(),
            mode: self.mode,
        })
    }

    /// Set both fields and submit in one step.
    pub fn submit_with(
        &mut self,
        response: impl Into<String>,
        mode: ThinkingMode,
    ) -> Result<DialogOutcome, SessionError> {
        self.set_response(response)?;
        self.set_mode(mode)?;
        self.submit()
    }

    /// Finish without an answer. Nothing is written.
    pub fn cancel(&mut self) -> Result<DialogOutcome, SessionError> {
        self.ensure_open()?;
        self.transition(SessionState::Cancelling);
        self.transition(SessionState::Closed);
        tracing::info!("Decision cancelled");
        Ok(DialogOutcome::Cancelled)
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "Session state change");
        self.state = next;
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(SessionError::Closed)
        }
    }
}

fn should_record(response: &str) -> bool {
    !response.is_empty() && response != CANCELLED_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_HISTORY_LIMIT;
    use tempfile::TempDir;

    fn open_session(request: DecisionRequest) -> (TempDir, DialogSession) {
        let temp_dir = TempDir::new().unwrap();
        let session = DialogSession::open(
            request,
            PreferenceStore::new(temp_dir.path().join("pref")),
            HistoryStore::open(temp_dir.path().join("history.json"), DEFAULT_HISTORY_LIMIT),
        );
        (temp_dir, session)
    }

    fn reload(temp_dir: &TempDir) -> (PreferenceStore, HistoryStore) {
        (
            PreferenceStore::new(temp_dir.path().join("pref")),
            HistoryStore::open(temp_dir.path().join("history.json"), DEFAULT_HISTORY_LIMIT),
        )
    }

    #[test]
    fn test_submit_encodes_response_and_mode() {
        let (temp_dir, mut session) = open_session(DecisionRequest {
            decision_context: "What now?".into(),
            ..Default::default()
        });
        let outcome = session.submit_with("fix the bug", ThinkingMode::Deep).unwrap();
        assert_eq!(outcome.encode(), "fix the bug|||deep");
        assert_eq!(session.state(), SessionState::Closed);

        let (prefs, history) = reload(&temp_dir);
        assert_eq!(prefs.load(), ThinkingMode::Deep);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].response, "fix the bug");
        assert_eq!(history.entries()[0].context, "What now?");
    }

    #[test]
    fn test_cancel_writes_nothing() {
        let (temp_dir, mut session) = open_session(DecisionRequest {
            default_action: "proceed".into(),
            ..Default::default()
        });
        session.set_mode(ThinkingMode::Ultra).unwrap();
        let outcome = session.cancel().unwrap();
        assert_eq!(outcome.encode(), "CANCELLED");

        let (prefs, history) = reload(&temp_dir);
        assert!(history.is_empty());
        assert!(prefs.read().unwrap_err().is_missing());
    }

    #[test]
    fn test_selecting_first_option() {
        let (_temp_dir, mut session) = open_session(DecisionRequest {
            options: vec!["A".into(), "B".into()],
            ..Default::default()
        });
        session.select_option(1).unwrap();
        let outcome = session.submit().unwrap();
        assert_eq!(
            outcome,
            DialogOutcome::Submitted {
                response: "A".into(),
                mode: ThinkingMode::Normal,
            }
        );
    }

    #[test]
    fn test_selecting_missing_option_fails() {
        let (_temp_dir, mut session) = open_session(DecisionRequest {
            options: vec!["A".into()],
            default_action: "keep".into(),
            ..Default::default()
        });
        assert_eq!(
            session.select_option(2),
            Err(SessionError::NoSuchOption {
                number: 2,
                available: 1
            })
        );
        assert_eq!(session.select_option(0).unwrap_err(), SessionError::NoSuchOption {
            number: 0,
            available: 1
        });
        assert_eq!(session.response(), "keep");
    }

    #[test]
    fn test_default_action_is_submitted_unedited() {
        let (_temp_dir, mut session) = open_session(DecisionRequest {
            default_action: "proceed".into(),
            ..Default::default()
        });
        assert_eq!(session.response(), "proceed");
        let outcome = session.submit().unwrap();
        assert_eq!(outcome.encode(), "proceed|||normal");
    }

    #[test]
    fn test_empty_default_leaves_response_empty() {
        let (_temp_dir, session) = open_session(DecisionRequest::default());
        assert_eq!(session.response(), "");
    }

    #[test]
    fn test_empty_and_sentinel_responses_are_not_recorded() {
        for response in ["", "CANCELLED"] {
            let (temp_dir, mut session) = open_session(DecisionRequest::default());
            session.submit_with(response, ThinkingMode::Quick).unwrap();

            let (prefs, history) = reload(&temp_dir);
            assert!(history.is_empty());
            assert_eq!(prefs.load(), ThinkingMode::Quick);
        }
    }

    #[test]
    fn test_mode_starts_from_saved_preference() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::new(temp_dir.path().join("pref"));
        prefs.save(ThinkingMode::Ultra).unwrap();

        let session = DialogSession::open(
            DecisionRequest::default(),
            prefs,
            HistoryStore::open(temp_dir.path().join("history.json"), DEFAULT_HISTORY_LIMIT),
        );
        assert_eq!(session.mode(), ThinkingMode::Ultra);
    }

    #[test]
    fn test_submit_and_cancel_end_closed() {
        let (_temp_dir, mut session) = open_session(DecisionRequest::default());
        assert_eq!(session.state(), SessionState::Open);
        session.submit().unwrap();
        assert_eq!(session.state(), SessionState::Closed);

        let (_temp_dir, mut session) = open_session(DecisionRequest::default());
        session.cancel().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(!session.is_open());
    }

    #[test]
    fn test_closed_session_rejects_input() {
        let (_temp_dir, mut session) = open_session(DecisionRequest {
            options: vec!["A".into()],
            ..Default::default()
        });
        session.cancel().unwrap();

        assert_eq!(session.set_response("late"), Err(SessionError::Closed));
        assert_eq!(session.select_option(1), Err(SessionError::Closed));
        assert_eq!(session.set_mode(ThinkingMode::Deep), Err(SessionError::Closed));
        assert_eq!(session.submit(), Err(SessionError::Closed));
        assert_eq!(session.cancel(), Err(SessionError::Closed));
    }

    #[test]
    fn test_store_failures_do_not_block_submit() {
        let temp_dir = TempDir::new().unwrap();
        // Both stores point at a directory, so every write fails.
        let mut session = DialogSession::open(
            DecisionRequest::default(),
            PreferenceStore::new(temp_dir.path()),
            HistoryStore::open(temp_dir.path(), DEFAULT_HISTORY_LIMIT),
        );
        let outcome = session.submit_with("still works", ThinkingMode::Deep).unwrap();
        assert_eq!(outcome.encode(), "still works|||deep");
    }

    #[test]
    fn test_recent_responses_come_from_history() {
        let temp_dir = TempDir::new().unwrap();
        let mut history =
            HistoryStore::open(temp_dir.path().join("history.json"), DEFAULT_HISTORY_LIMIT);
        history.append("older", "", ThinkingMode::Normal).unwrap();
        history.append("newer", "", ThinkingMode::Normal).unwrap();

        let session = DialogSession::open(
            DecisionRequest::default(),
            PreferenceStore::new(temp_dir.path().join("pref")),
            history,
        );
        let recent: Vec<_> = session
            .recent_responses(5)
            .iter()
            .map(|r| r.response.as_str())
            .collect();
        assert_eq!(recent, vec!["newer", "older"]);
    }
}
