// src/application/data_fetcher.rs
use crate::application::{DataApi, ObjectStorage, StorageKeyPolicy};
use crate::domain::{DomainError, ImageDisplay, NoteRow};
use tracing::{debug, warn};

pub struct NoteFetcher<'a, D: DataApi, S: ObjectStorage> {
    data_api: &'a D,
    storage: &'a S,
    key_policy: StorageKeyPolicy,
}

impl<'a, D: DataApi, S: ObjectStorage> NoteFetcher<'a, D, S> {
    pub fn new(data_api: &'a D, storage: &'a S, key_policy: StorageKeyPolicy) -> Self {
        Self {
            data_api,
            storage,
            key_policy,
        }
    }

    /// Fetch every note and resolve display URLs for the ones with images.
    ///
    /// A failed list query fails the fetch. A failed image resolution only
    /// marks that row's image as unavailable.
    pub fn fetch_all(&self) -> Result<Vec<NoteRow>, DomainError> {
        let notes = self.data_api.list_notes()?;
        debug!(count = notes.len(), "Fetched notes");

        let rows = notes
            .into_iter()
            .map(|note| {
                let image = match self.key_policy.resolve_key(&note) {
                    None => ImageDisplay::None,
                    Some(key) => match self.storage.get_url(key) {
                        Ok(url) => ImageDisplay::Url(url),
                        Err(e) => {
                            warn!(note_id = %note.id, key, error = %e, "Image unavailable");
                            ImageDisplay::Unavailable
                        }
                    },
                };
                NoteRow { note, image }
            })
            .collect();

        Ok(rows)
    }
}
