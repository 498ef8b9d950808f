// src/application/mutation_dispatcher.rs
use crate::application::{DataApi, ObjectStorage, StorageKeyPolicy, Submission};
use crate::domain::{CreateNoteInput, DomainError, ImageUpload, Note, UpdateNoteInput};
use tracing::{debug, info, instrument, warn};

/// Translates form submissions and deletes into remote writes.
///
/// Every operation is a single attempt. Images are uploaded before the data
/// mutation is issued, so a failed mutation can leave an orphaned object.
/// A successful update that replaces an image removes the previous object.
pub struct MutationDispatcher<'a, D: DataApi, S: ObjectStorage> {
    data_api: &'a D,
    storage: &'a S,
    key_policy: StorageKeyPolicy,
}

impl<'a, D: DataApi, S: ObjectStorage> MutationDispatcher<'a, D, S> {
    pub fn new(data_api: &'a D, storage: &'a S, key_policy: StorageKeyPolicy) -> Self {
        Self {
            data_api,
            storage,
            key_policy,
        }
    }

    /// Run a submission. `current_image` is the stored image key of the note
    /// being updated; it is kept when no new file is attached.
    pub fn submit(
        &self,
        submission: &Submission,
        current_image: Option<&str>,
    ) -> Result<Note, DomainError> {
        match submission {
            Submission::Create {
                name,
                description,
                image,
            } => {
                let image = self.upload(name, image.as_ref())?;
                let input = CreateNoteInput {
                    name: name.clone(),
                    description: description.clone(),
                    image,
                };
                let note = self.data_api.create_note(&input)?;
                info!(note_id = %note.id, "Created note");
                Ok(note)
            }
            Submission::Update {
                id,
                name,
                description,
                image,
            } => {
                let uploaded = self.upload(name, image.as_ref())?;
                let input = UpdateNoteInput {
                    id: id.clone(),
                    name: name.clone(),
                    description: description.clone(),
                    image: uploaded.clone().or_else(|| current_image.map(str::to_string)),
                };
                let note = self.data_api.update_note(&input)?;
                info!(note_id = %note.id, "Updated note");

                if let (Some(new_key), Some(old_key)) = (uploaded.as_deref(), current_image) {
                    if new_key != old_key {
                        self.discard_replaced(old_key);
                    }
                }
                Ok(note)
            }
        }
    }

    /// Remove the note's image object, then the note itself
    #[instrument(level = "debug", skip(self, note), fields(note_id = %note.id))]
    pub fn delete(&self, note: &Note) -> Result<(), DomainError> {
        if let Some(key) = self.key_policy.remove_key(note) {
            self.storage.remove(key)?;
        }
        self.data_api.delete_note(&note.id)?;
        info!(note_id = %note.id, "Deleted note");
        Ok(())
    }

    /// Best effort: the update already points at the new object
    fn discard_replaced(&self, key: &str) {
        match self.storage.remove(key) {
            Ok(()) => debug!(key, "Removed replaced image"),
            Err(e) => warn!(key, error = %e, "Replaced image left in storage"),
        }
    }

    fn upload(
        &self,
        name: &str,
        image: Option<&ImageUpload>,
    ) -> Result<Option<String>, DomainError> {
        let Some(image) = image else {
            return Ok(None);
        };
        let key = self.key_policy.upload_key(name);
        debug!(key = %key, file_name = %image.file_name, bytes = image.bytes.len(), "Uploading image");
        self.storage.put(&key, &image.bytes)?;
        Ok(Some(key))
    }
}
