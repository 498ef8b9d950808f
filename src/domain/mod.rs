// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod session;

pub use error::DomainError;
pub use note::{
    CreateNoteInput, DeleteNoteInput, ImageDisplay, ImageUpload, Note, NoteId, NoteRow,
    UpdateNoteInput,
};
pub use session::{Session, UserSession};
