// src/application/mod.rs
pub mod auth;
pub mod data_fetcher;
pub mod form_controller;
pub mod mutation_dispatcher;
pub mod notes_view;
pub mod remote;
pub mod storage_key;

pub use auth::AuthProvider;
pub use data_fetcher::NoteFetcher;
pub use form_controller::{EditState, FormController, NoteForm, Submission};
pub use mutation_dispatcher::MutationDispatcher;
pub use notes_view::{Notice, NoticeLevel, NotesPage, NotesView, PendingDelete};
pub use remote::{DataApi, ObjectStorage};
pub use storage_key::StorageKeyPolicy;
