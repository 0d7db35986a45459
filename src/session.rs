//! Preview session state machine.
//!
//! Models the lifecycle of one share-link preview:
//!
//! ```text
//! idle → loading → { error | awaiting-password | ready }
//! ```
//!
//! `awaiting-password` goes back to `loading` on password submission and
//! returns to `ready` or `awaiting-password` (wrong password) depending on
//! the re-fetch outcome. `ready` holds the preview list plus a selection
//! set scoping bulk downloads to "all" or "selected". The session is a
//! plain state container mutated from the driving task; it defines no
//! timeout or cancellation for an in-flight fetch, and `resolve` applies
//! whatever outcome it is handed, superseded or not.

use std::collections::HashSet;

use crate::content::{ContentEnvelope, PreviewFile, preview_files};
use crate::download::DownloadItem;
use crate::error::{Error, Result};

/// Phase of a preview session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The listing is locked; a password must be submitted.
    AwaitingPassword {
        /// Message from a failed previous attempt, if any.
        error: Option<String>,
    },
    /// The listing is loaded and selectable.
    Ready,
    /// The fetch failed terminally for this attempt.
    Error(String),
}

/// Scope of a bulk download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadScope {
    All,
    Selected,
}

/// Per-preview transient state: phase, file list, and selection.
pub struct PreviewSession {
    phase: SessionPhase,
    password_phase: bool,
    files: Vec<PreviewFile>,
    selected: HashSet<String>,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            password_phase: false,
            files: Vec::new(),
            selected: HashSet::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready)
    }

    /// The previewed files from the most recent resolved fetch.
    #[must_use]
    pub fn files(&self) -> &[PreviewFile] {
        &self.files
    }

    /// Marks an initial (passwordless) fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.phase = SessionPhase::Loading;
        self.password_phase = false;
    }

    /// Marks a password re-fetch as in flight.
    pub fn begin_password_fetch(&mut self) {
        self.phase = SessionPhase::Loading;
        self.password_phase = true;
    }

    /// Applies a fetch outcome, transitioning out of `loading`.
    ///
    /// A wrong password (upstream rejection during a password re-fetch)
    /// returns to `awaiting-password` with a message rather than failing
    /// the session, matching the dialog loop it models.
    pub fn resolve(&mut self, outcome: Result<ContentEnvelope>) {
        match outcome {
            Ok(envelope) => {
                self.files = preview_files(&envelope);
                self.selected.clear();
                self.phase = SessionPhase::Ready;
            }
            Err(Error::PasswordRequired) => {
                self.files.clear();
                self.selected.clear();
                self.phase = SessionPhase::AwaitingPassword { error: None };
            }
            Err(e) if self.password_phase => {
                self.files.clear();
                self.selected.clear();
                let message = match e {
                    Error::Status(_) => "Invalid password".to_string(),
                    other => format!("Failed to authenticate: {other}"),
                };
                self.phase = SessionPhase::AwaitingPassword {
                    error: Some(message),
                };
            }
            Err(e) => {
                self.files.clear();
                self.selected.clear();
                self.phase = SessionPhase::Error(e.to_string());
            }
        }
    }

    /// Toggles selection of a file by identifier.
    ///
    /// Returns false (and does nothing) when the session is not ready or
    /// the identifier is unknown.
    pub fn toggle_select(&mut self, id: &str) -> bool {
        if !self.is_ready() || !self.files.iter().any(|f| f.item.id == id) {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        true
    }

    /// Selects every previewed file.
    pub fn select_all(&mut self) {
        self.selected = self.files.iter().map(|f| f.item.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// The scope a bulk download would use: `Selected` when any file is
    /// selected, `All` otherwise.
    #[must_use]
    pub fn scope(&self) -> DownloadScope {
        if self.selected.is_empty() {
            DownloadScope::All
        } else {
            DownloadScope::Selected
        }
    }

    /// Builds the ordered download queue for the current scope.
    ///
    /// Folder entries carry no direct link and are not queued.
    #[must_use]
    pub fn download_items(&self) -> Vec<DownloadItem> {
        let selected_only = self.scope() == DownloadScope::Selected;
        self.files
            .iter()
            .filter(|f| f.item.kind.is_file())
            .filter(|f| !selected_only || self.selected.contains(&f.item.id))
            .map(DownloadItem::from_preview)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_envelope() -> ContentEnvelope {
        serde_json::from_str(
            r#"{
            "status": "ok",
            "data": {"isPassword": false, "contents": {
                "f1": {"id": "f1", "name": "a.png", "type": "file", "size": 2048,
                       "link": "https://x/a.png", "mimetype": "image/png"},
                "f2": {"id": "f2", "name": "b.zip", "type": "file", "size": 10,
                       "link": "https://x/b.zip", "mimetype": "application/zip"},
                "d1": {"id": "d1", "name": "sub", "type": "folder"}
            }}
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn starts_idle_and_empty() {
        let session = PreviewSession::new();
        assert_eq!(*session.phase(), SessionPhase::Idle);
        assert!(session.files().is_empty());
        assert_eq!(session.scope(), DownloadScope::All);
    }

    #[test]
    fn fetch_to_ready() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        assert_eq!(*session.phase(), SessionPhase::Loading);

        session.resolve(Ok(ok_envelope()));
        assert!(session.is_ready());
        assert_eq!(session.files().len(), 3);
    }

    #[test]
    fn fetch_to_error() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Err(Error::Status("error-notFound".to_string())));
        assert!(matches!(session.phase(), SessionPhase::Error(_)));
        assert!(session.files().is_empty());
    }

    #[test]
    fn locked_listing_awaits_password_without_surfacing_files() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Err(Error::PasswordRequired));
        assert_eq!(
            *session.phase(),
            SessionPhase::AwaitingPassword { error: None }
        );
        assert!(session.files().is_empty());
    }

    #[test]
    fn wrong_password_loops_back_with_message() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Err(Error::PasswordRequired));

        session.begin_password_fetch();
        assert_eq!(*session.phase(), SessionPhase::Loading);
        session.resolve(Err(Error::Status("error-passwordWrong".to_string())));
        assert_eq!(
            *session.phase(),
            SessionPhase::AwaitingPassword {
                error: Some("Invalid password".to_string())
            }
        );

        // A good password finally succeeds.
        session.begin_password_fetch();
        session.resolve(Ok(ok_envelope()));
        assert!(session.is_ready());
    }

    #[test]
    fn status_failure_outside_password_phase_is_terminal() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Err(Error::Status("error-notFound".to_string())));
        assert!(matches!(session.phase(), SessionPhase::Error(_)));
    }

    #[test]
    fn toggle_select_known_ids_only() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));

        assert!(session.toggle_select("f1"));
        assert_eq!(session.selected_count(), 1);
        assert!(!session.toggle_select("nope"));
        assert_eq!(session.selected_count(), 1);

        // Toggling again deselects.
        assert!(session.toggle_select("f1"));
        assert_eq!(session.selected_count(), 0);
    }

    #[test]
    fn toggle_select_requires_ready() {
        let mut session = PreviewSession::new();
        assert!(!session.toggle_select("f1"));
    }

    #[test]
    fn scope_follows_selection() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));

        assert_eq!(session.scope(), DownloadScope::All);
        session.toggle_select("f2");
        assert_eq!(session.scope(), DownloadScope::Selected);
        session.clear_selection();
        assert_eq!(session.scope(), DownloadScope::All);
    }

    #[test]
    fn download_items_all_scope_excludes_folders() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));

        let items = session.download_items();
        let names: Vec<_> = items.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.zip"]);
    }

    #[test]
    fn download_items_selected_scope() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));
        session.toggle_select("f2");

        let items = session.download_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "b.zip");
    }

    #[test]
    fn select_all_then_items_match_files() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));
        session.select_all();
        // All three entries are selected, two are downloadable files.
        assert_eq!(session.selected_count(), 3);
        assert_eq!(session.download_items().len(), 2);
    }

    #[test]
    fn refetch_clears_stale_selection() {
        let mut session = PreviewSession::new();
        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));
        session.toggle_select("f1");

        session.begin_fetch();
        session.resolve(Ok(ok_envelope()));
        assert_eq!(session.selected_count(), 0);
        assert_eq!(session.scope(), DownloadScope::All);
    }
}
