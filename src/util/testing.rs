// src/util/testing.rs

use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{AuthProvider, DataApi, ObjectStorage};
use crate::domain::{CreateNoteInput, DomainError, Note, NoteId, Session, UpdateNoteInput};

/// One call made against a remote collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    ListNotes,
    CreateNote(CreateNoteInput),
    UpdateNote(UpdateNoteInput),
    DeleteNote(NoteId),
    GetUrl(String),
    Put(String),
    Remove(String),
}

/// Call log shared between mocks so tests can assert ordering across
/// the data API and object storage
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<RemoteCall>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: RemoteCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Position of the first call equal to `call`
    pub fn position(&self, call: &RemoteCall) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == call)
    }

    pub fn count(&self, predicate: impl Fn(&RemoteCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|&c| predicate(c)).count()
    }
}

/// In-memory data API that records every call.
///
/// # Examples
///
/// ```
/// use notesview::application::DataApi;
/// use notesview::domain::{Note, NoteId};
/// use notesview::util::testing::{CallLog, MockDataApi, RemoteCall};
///
/// let log = CallLog::new();
/// let api = MockDataApi::builder()
///     .with_note(Note {
///         id: NoteId::new("1"),
///         name: "Cat".to_string(),
///         description: "A cat".to_string(),
///         image: None,
///     })
///     .build(&log);
///
/// assert_eq!(api.list_notes().unwrap().len(), 1);
/// assert_eq!(log.calls(), vec![RemoteCall::ListNotes]);
/// ```
pub struct MockDataApi {
    log: CallLog,
    notes: RefCell<Vec<Note>>,
    next_id: Cell<u64>,
    fail_list: bool,
    fail_create: bool,
    fail_update: bool,
    delete_not_found: HashSet<NoteId>,
    delete_failures: HashSet<NoteId>,
}

impl MockDataApi {
    pub fn builder() -> MockDataApiBuilder {
        MockDataApiBuilder::new()
    }

    /// Current remote contents
    pub fn notes(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }
}

impl DataApi for MockDataApi {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.log.record(RemoteCall::ListNotes);
        if self.fail_list {
            return Err(DomainError::Network("connection reset".to_string()));
        }
        Ok(self.notes.borrow().clone())
    }

    fn create_note(&self, input: &CreateNoteInput) -> Result<Note, DomainError> {
        self.log.record(RemoteCall::CreateNote(input.clone()));
        if self.fail_create {
            return Err(DomainError::Network("connection reset".to_string()));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let note = Note {
            id: NoteId::new(format!("note-{}", id)),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
        };
        self.notes.borrow_mut().push(note.clone());
        Ok(note)
    }

    fn update_note(&self, input: &UpdateNoteInput) -> Result<Note, DomainError> {
        self.log.record(RemoteCall::UpdateNote(input.clone()));
        if self.fail_update {
            return Err(DomainError::Network("connection reset".to_string()));
        }
        let mut notes = self.notes.borrow_mut();
        let note = notes
            .iter_mut()
            .find(|n| n.id == input.id)
            .ok_or_else(|| DomainError::NotFound(input.id.to_string()))?;
        note.name = input.name.clone();
        note.description = input.description.clone();
        note.image = input.image.clone();
        Ok(note.clone())
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        self.log.record(RemoteCall::DeleteNote(id.clone()));
        if self.delete_not_found.contains(id) {
            return Err(DomainError::NotFound(id.to_string()));
        }
        if self.delete_failures.contains(id) {
            return Err(DomainError::Network("connection reset".to_string()));
        }
        let mut notes = self.notes.borrow_mut();
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        if notes.len() == before {
            return Err(DomainError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Builder for MockDataApi
pub struct MockDataApiBuilder {
    notes: Vec<Note>,
    fail_list: bool,
    fail_create: bool,
    fail_update: bool,
    delete_not_found: HashSet<NoteId>,
    delete_failures: HashSet<NoteId>,
}

impl MockDataApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            fail_list: false,
            fail_create: false,
            fail_update: false,
            delete_not_found: HashSet::new(),
            delete_failures: HashSet::new(),
        }
    }

    /// Seed a note into the remote collection
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Make list_notes fail with a network error
    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn with_create_failure(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn with_update_failure(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Make delete_note report NotFound for a specific ID
    pub fn with_delete_not_found(mut self, id: &str) -> Self {
        self.delete_not_found.insert(NoteId::new(id));
        self
    }

    /// Make delete_note fail with a network error for a specific ID
    pub fn with_delete_failure(mut self, id: &str) -> Self {
        self.delete_failures.insert(NoteId::new(id));
        self
    }

    pub fn build(self, log: &CallLog) -> MockDataApi {
        MockDataApi {
            log: log.clone(),
            notes: RefCell::new(self.notes),
            next_id: Cell::new(1),
            fail_list: self.fail_list,
            fail_create: self.fail_create,
            fail_update: self.fail_update,
            delete_not_found: self.delete_not_found,
            delete_failures: self.delete_failures,
        }
    }
}

impl Default for MockDataApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory object storage that records every call.
///
/// URLs are `mock://<key>`; resolution does not require the object to exist.
pub struct MockObjectStorage {
    log: CallLog,
    objects: RefCell<HashMap<String, Vec<u8>>>,
    get_failures: HashSet<String>,
    put_failures: HashSet<String>,
    remove_failures: HashSet<String>,
}

impl MockObjectStorage {
    pub fn builder() -> MockObjectStorageBuilder {
        MockObjectStorageBuilder::new()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.borrow().get(key).cloned()
    }
}

impl ObjectStorage for MockObjectStorage {
    fn get_url(&self, key: &str) -> Result<String, DomainError> {
        self.log.record(RemoteCall::GetUrl(key.to_string()));
        if self.get_failures.contains(key) {
            return Err(DomainError::Storage(format!("cannot resolve {}", key)));
        }
        Ok(format!("mock://{}", key))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.log.record(RemoteCall::Put(key.to_string()));
        if self.put_failures.contains(key) {
            return Err(DomainError::Storage(format!("cannot upload {}", key)));
        }
        self.objects
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.log.record(RemoteCall::Remove(key.to_string()));
        if self.remove_failures.contains(key) {
            return Err(DomainError::Storage(format!("cannot remove {}", key)));
        }
        self.objects.borrow_mut().remove(key);
        Ok(())
    }
}

/// Builder for MockObjectStorage
pub struct MockObjectStorageBuilder {
    objects: HashMap<String, Vec<u8>>,
    get_failures: HashSet<String>,
    put_failures: HashSet<String>,
    remove_failures: HashSet<String>,
}

impl MockObjectStorageBuilder {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            get_failures: HashSet::new(),
            put_failures: HashSet::new(),
            remove_failures: HashSet::new(),
        }
    }

    pub fn with_object(mut self, key: &str, bytes: Vec<u8>) -> Self {
        self.objects.insert(key.to_string(), bytes);
        self
    }

    pub fn with_get_failure(mut self, key: &str) -> Self {
        self.get_failures.insert(key.to_string());
        self
    }

    pub fn with_put_failure(mut self, key: &str) -> Self {
        self.put_failures.insert(key.to_string());
        self
    }

    pub fn with_remove_failure(mut self, key: &str) -> Self {
        self.remove_failures.insert(key.to_string());
        self
    }

    pub fn build(self, log: &CallLog) -> MockObjectStorage {
        MockObjectStorage {
            log: log.clone(),
            objects: RefCell::new(self.objects),
            get_failures: self.get_failures,
            put_failures: self.put_failures,
            remove_failures: self.remove_failures,
        }
    }
}

impl Default for MockObjectStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockAuthProvider {
    session: Session,
    fail_sign_out: bool,
}

impl MockAuthProvider {
    pub fn signed_in(username: &str) -> Self {
        Self {
            session: Session::signed_in(username),
            fail_sign_out: false,
        }
    }

    pub fn failing_sign_out(mut self) -> Self {
        self.fail_sign_out = true;
        self
    }
}

impl AuthProvider for MockAuthProvider {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn sign_out(&mut self) -> Result<(), DomainError> {
        if self.fail_sign_out {
            return Err(DomainError::Network("sign-out endpoint unreachable".to_string()));
        }
        self.session = Session::SignedOut;
        Ok(())
    }
}

/// Default filter when `RUST_LOG` is unset: our own crate at trace, the
/// HTTP stack quiet
const TEST_LOG_FILTER: &str = "notesview=trace,warn";

const QUIET_TARGETS: [&str; 4] = ["hyper", "reqwest", "rustls", "h2"];

static LOGGING: Once = Once::new();

/// One-time setup shared by unit and integration tests
pub fn init_test_setup() -> Result<()> {
    LOGGING.call_once(install_test_subscriber);
    debug!("Test setup complete");
    Ok(())
}

fn install_test_subscriber() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TEST_LOG_FILTER));

    let layer = fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter_fn(|metadata| {
            !QUIET_TARGETS
                .iter()
                .any(|target| metadata.target().starts_with(target))
        }))
        .with_filter(env_filter);

    if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
        // A global subscriber may already be set
        eprintln!("Test logging not installed: {}", e);
    }
}
