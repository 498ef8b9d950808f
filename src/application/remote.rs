// src/application/remote.rs
use crate::domain::{CreateNoteInput, DomainError, Note, NoteId, UpdateNoteInput};

/// Structured-data API holding the note collection
pub trait DataApi {
    /// All notes, unfiltered and unpaginated
    fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    /// Create a note; the API assigns the id
    fn create_note(&self, input: &CreateNoteInput) -> Result<Note, DomainError>;

    fn update_note(&self, input: &UpdateNoteInput) -> Result<Note, DomainError>;

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError>;
}

/// Key-addressed blob store for note images
pub trait ObjectStorage {
    /// Display URL for a stored object
    fn get_url(&self, key: &str) -> Result<String, DomainError>;

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError>;

    /// Remove an object. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}

impl<T: DataApi + ?Sized> DataApi for Box<T> {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes()
    }

    fn create_note(&self, input: &CreateNoteInput) -> Result<Note, DomainError> {
        (**self).create_note(input)
    }

    fn update_note(&self, input: &UpdateNoteInput) -> Result<Note, DomainError> {
        (**self).update_note(input)
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        (**self).delete_note(id)
    }
}

impl<T: ObjectStorage + ?Sized> ObjectStorage for Box<T> {
    fn get_url(&self, key: &str) -> Result<String, DomainError> {
        (**self).get_url(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        (**self).put(key, bytes)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key)
    }
}
