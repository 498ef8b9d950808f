// src/application/notes_view.rs
use crate::application::{
    AuthProvider, DataApi, EditState, FormController, MutationDispatcher, NoteFetcher, NoteForm,
    ObjectStorage, StorageKeyPolicy,
};
use crate::domain::{DomainError, Note, NoteId, NoteRow, Session};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// User-visible, dismissible message raised by a failed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// A row tentatively removed from the list, awaiting remote confirmation
#[derive(Debug)]
#[must_use = "a pending delete must be confirmed"]
pub struct PendingDelete {
    row: NoteRow,
    index: usize,
}

impl PendingDelete {
    pub fn note(&self) -> &Note {
        &self.row.note
    }
}

/// Read-only snapshot of everything a presenter draws
#[derive(Debug)]
pub struct NotesPage<'a> {
    pub username: &'a str,
    pub rows: &'a [NoteRow],
    pub edit_state: &'a EditState,
    pub form: &'a NoteForm,
    pub notices: &'a [Notice],
}

/// The notes view: note list, form and edit state, and notices, bound to
/// one signed-in session.
///
/// Operations catch errors at this boundary: each failure is recorded as a
/// [`Notice`] and also returned to the caller.
pub struct NotesView<D: DataApi, S: ObjectStorage> {
    session: Session,
    data_api: D,
    storage: S,
    key_policy: StorageKeyPolicy,
    rows: Vec<NoteRow>,
    form: FormController,
    notices: Vec<Notice>,
    next_notice_id: u64,
}

impl<D: DataApi, S: ObjectStorage> NotesView<D, S> {
    /// Build the view for a signed-in session
    pub fn new(session: Session, data_api: D, storage: S) -> Result<Self, DomainError> {
        if !session.is_signed_in() {
            return Err(DomainError::Unauthenticated);
        }
        Ok(Self {
            session,
            data_api,
            storage,
            key_policy: StorageKeyPolicy::default(),
            rows: Vec::new(),
            form: FormController::new(),
            notices: Vec::new(),
            next_notice_id: 1,
        })
    }

    pub fn with_key_policy(mut self, key_policy: StorageKeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rows(&self) -> &[NoteRow] {
        &self.rows
    }

    pub fn row(&self, id: &NoteId) -> Option<&NoteRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn edit_state(&self) -> &EditState {
        self.form.state()
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Form fields, for typing into
    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        self.notices.len() != before
    }

    pub fn page(&self) -> NotesPage<'_> {
        NotesPage {
            username: self.session.username().unwrap_or_default(),
            rows: &self.rows,
            edit_state: self.form.state(),
            form: self.form.form(),
            notices: &self.notices,
        }
    }

    /// Initial load
    pub fn mount(&mut self) -> Result<(), DomainError> {
        info!(username = self.session.username(), "Mounting notes view");
        self.refresh()
    }

    /// Replace the list with the data API's current contents.
    /// On failure the previous list is kept.
    pub fn refresh(&mut self) -> Result<(), DomainError> {
        self.ensure_signed_in()?;
        let fetched =
            NoteFetcher::new(&self.data_api, &self.storage, self.key_policy).fetch_all();
        match fetched {
            Ok(rows) => {
                self.rows = rows;
                Ok(())
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Bind the form to an existing row
    pub fn select_edit(&mut self, id: &NoteId) -> Result<(), DomainError> {
        self.ensure_signed_in()?;
        let Some(note) = self.row(id).map(|row| row.note.clone()) else {
            return Err(self.raise(DomainError::NotFound(id.to_string())));
        };
        self.form.select_edit(&note);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
    }

    /// Submit the form as create or update depending on the edit state.
    ///
    /// On success the form is reset, edit state returns to none, and the
    /// list is re-fetched. A failed re-fetch only raises a notice, since the
    /// note was already written. On failure the form is left as it was.
    pub fn submit(&mut self) -> Result<Note, DomainError> {
        self.ensure_signed_in()?;
        let submission = match self.form.submission() {
            Ok(submission) => submission,
            Err(e) => return Err(self.raise(e)),
        };

        let current_image = self
            .form
            .editing_id()
            .and_then(|id| self.row(id))
            .and_then(|row| row.note.image.clone());

        let result = MutationDispatcher::new(&self.data_api, &self.storage, self.key_policy)
            .submit(&submission, current_image.as_deref());
        let note = match result {
            Ok(note) => note,
            Err(e) => return Err(self.raise(e)),
        };

        self.form.reset();
        if let Err(e) = self.refresh() {
            // The write stands; the failed re-fetch is already a notice
            debug!(note_id = %note.id, error = %e, "List not refreshed after write");
        }
        Ok(note)
    }

    /// Remove a row locally ahead of the remote delete
    pub fn begin_delete(&mut self, id: &NoteId) -> Result<PendingDelete, DomainError> {
        self.ensure_signed_in()?;
        let Some(index) = self.rows.iter().position(|row| row.id() == id) else {
            return Err(self.raise(DomainError::NotFound(id.to_string())));
        };
        if self.form.editing_id() == Some(id) {
            self.form.cancel();
        }
        let row = self.rows.remove(index);
        debug!(note_id = %id, index, "Removed row pending delete");
        Ok(PendingDelete { row, index })
    }

    /// Perform the remote delete for a pending row, reinserting it on failure.
    ///
    /// A data API answer of "not found" means the note is already gone, so
    /// the removal stands and only a warning is raised.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> Result<(), DomainError> {
        let result = MutationDispatcher::new(&self.data_api, &self.storage, self.key_policy)
            .delete(&pending.row.note);
        match result {
            Ok(()) => Ok(()),
            Err(DomainError::NotFound(id)) => {
                self.push_notice(
                    NoticeLevel::Warning,
                    format!("Note {} was already deleted", id),
                );
                Ok(())
            }
            Err(e) => {
                let index = pending.index.min(self.rows.len());
                warn!(note_id = %pending.row.note.id, index, "Rolling back delete");
                self.rows.insert(index, pending.row);
                Err(self.raise(e))
            }
        }
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<(), DomainError> {
        let pending = self.begin_delete(id)?;
        self.confirm_delete(pending)
    }

    /// End the session and drop all view state
    pub fn sign_out<A: AuthProvider>(&mut self, auth: &mut A) -> Result<(), DomainError> {
        if let Err(e) = auth.sign_out() {
            return Err(self.raise(e));
        }
        info!(username = self.session.username(), "Signed out");
        self.session = Session::SignedOut;
        self.rows.clear();
        self.form.reset();
        self.notices.clear();
        Ok(())
    }

    fn ensure_signed_in(&self) -> Result<(), DomainError> {
        if self.session.is_signed_in() {
            Ok(())
        } else {
            Err(DomainError::Unauthenticated)
        }
    }

    fn raise(&mut self, error: DomainError) -> DomainError {
        let level = match error {
            DomainError::Validation(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        warn!(error = %error, "Operation failed");
        self.push_notice(level, error.to_string());
        error
    }

    fn push_notice(&mut self, level: NoticeLevel, message: String) {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push(Notice { id, level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{CallLog, MockAuthProvider, MockDataApi, MockObjectStorage};

    fn note(id: &str, name: &str) -> Note {
        Note {
            id: NoteId::new(id),
            name: name.to_string(),
            description: format!("about {}", name),
            image: None,
        }
    }

    #[test]
    fn given_signed_out_session_when_building_view_then_fails() {
        let log = CallLog::new();
        let result = NotesView::new(
            Session::SignedOut,
            MockDataApi::builder().build(&log),
            MockObjectStorage::builder().build(&log),
        );

        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[test]
    fn given_invalid_form_when_submitting_then_raises_warning_notice() {
        // Arrange
        let log = CallLog::new();
        let mut view = NotesView::new(
            Session::signed_in("alice"),
            MockDataApi::builder().build(&log),
            MockObjectStorage::builder().build(&log),
        )
        .unwrap();
        view.form_mut().set_name("A");

        // Act
        let result = view.submit();

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(view.notices().len(), 1);
        assert_eq!(view.notices()[0].level, NoticeLevel::Warning);
        assert!(log.calls().is_empty());
        assert_eq!(view.form().form().name, "A");
    }

    #[test]
    fn given_notice_when_dismissing_then_removes_only_that_notice() {
        // Arrange
        let log = CallLog::new();
        let mut view = NotesView::new(
            Session::signed_in("alice"),
            MockDataApi::builder().build(&log),
            MockObjectStorage::builder().build(&log),
        )
        .unwrap();
        let _ = view.submit();
        let _ = view.select_edit(&NoteId::new("missing"));
        let first = view.notices()[0].id;

        // Act
        let dismissed = view.dismiss_notice(first);

        // Assert
        assert!(dismissed);
        assert_eq!(view.notices().len(), 1);
        assert!(!view.dismiss_notice(first));
    }

    #[test]
    fn given_delete_of_note_being_edited_when_beginning_delete_then_cancels_edit() {
        // Arrange
        let log = CallLog::new();
        let mut view = NotesView::new(
            Session::signed_in("alice"),
            MockDataApi::builder().with_note(note("1", "A")).build(&log),
            MockObjectStorage::builder().build(&log),
        )
        .unwrap();
        view.mount().unwrap();
        view.select_edit(&NoteId::new("1")).unwrap();

        // Act
        let pending = view.begin_delete(&NoteId::new("1")).unwrap();

        // Assert
        assert_eq!(view.edit_state(), &EditState::None);
        assert_eq!(pending.note().name, "A");
        view.confirm_delete(pending).unwrap();
    }

    #[test]
    fn given_stale_id_when_confirming_delete_then_keeps_removal_and_warns() {
        // Arrange
        let log = CallLog::new();
        let mut view = NotesView::new(
            Session::signed_in("alice"),
            MockDataApi::builder()
                .with_note(note("1", "A"))
                .with_delete_not_found("1")
                .build(&log),
            MockObjectStorage::builder().build(&log),
        )
        .unwrap();
        view.mount().unwrap();

        // Act
        let result = view.delete_note(&NoteId::new("1"));

        // Assert
        assert!(result.is_ok());
        assert!(view.rows().is_empty());
        assert_eq!(view.notices()[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn given_signed_in_view_when_signing_out_then_clears_state_and_rejects_operations() {
        // Arrange
        let log = CallLog::new();
        let mut view = NotesView::new(
            Session::signed_in("alice"),
            MockDataApi::builder().with_note(note("1", "A")).build(&log),
            MockObjectStorage::builder().build(&log),
        )
        .unwrap();
        view.mount().unwrap();
        let mut auth = MockAuthProvider::signed_in("alice");

        // Act
        view.sign_out(&mut auth).unwrap();

        // Assert
        assert_eq!(view.session(), &Session::SignedOut);
        assert!(view.rows().is_empty());
        assert!(!auth.session().is_signed_in());
        assert!(matches!(view.refresh(), Err(DomainError::Unauthenticated)));
    }
}
