use anyhow::{Context, Result};
use notesview::application::{NotesView, StorageKeyPolicy};
use notesview::domain::{Note, NoteId, Session};
use notesview::infrastructure::{DirectoryStorage, SqliteDataApi};
use notesview::util::testing::{CallLog, MockDataApi, MockObjectStorage};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for a local backend: SQLite file plus image directory
#[allow(dead_code)]
pub struct TestBackend {
    _temp_dir: TempDir,
    pub database_path: PathBuf,
    pub storage_dir: PathBuf,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let database_path = temp_dir.path().join("notes.sqlite3");
        let storage_dir = temp_dir.path().join("images");

        Ok(Self {
            _temp_dir: temp_dir,
            database_path,
            storage_dir,
        })
    }

    pub fn open_data_api(&self) -> Result<SqliteDataApi> {
        SqliteDataApi::open(&self.database_path)
    }

    pub fn open_storage(&self) -> Result<DirectoryStorage> {
        DirectoryStorage::new(&self.storage_dir)
    }

    /// Mounted view over this backend
    pub fn open_view(
        &self,
        key_policy: StorageKeyPolicy,
    ) -> Result<NotesView<SqliteDataApi, DirectoryStorage>> {
        let mut view = NotesView::new(
            Session::signed_in("tester"),
            self.open_data_api()?,
            self.open_storage()?,
        )?
        .with_key_policy(key_policy);
        view.mount()?;
        Ok(view)
    }
}

#[allow(dead_code)]
pub fn note(id: &str, name: &str, description: &str, image: Option<&str>) -> Note {
    Note {
        id: NoteId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        image: image.map(str::to_string),
    }
}

/// Mounted view over recording mocks, with the call log cleared after mount
#[allow(dead_code)]
pub fn mounted_mock_view(
    api: MockDataApi,
    storage: MockObjectStorage,
    log: &CallLog,
) -> NotesView<MockDataApi, MockObjectStorage> {
    let mut view = NotesView::new(Session::signed_in("tester"), api, storage)
        .expect("Signed-in session should build a view");
    view.mount().expect("Mount should succeed");
    log.clear();
    view
}
