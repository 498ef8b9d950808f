// src/application/form_controller.rs
use crate::domain::{DomainError, ImageUpload, Note, NoteId};
use tracing::debug;

/// Which note, if any, the form is bound to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    None,
    Editing(NoteId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteForm {
    pub name: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

/// Validated form contents, bound to create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create {
        name: String,
        description: String,
        image: Option<ImageUpload>,
    },
    Update {
        id: NoteId,
        name: String,
        description: String,
        image: Option<ImageUpload>,
    },
}

#[derive(Debug, Default)]
pub struct FormController {
    state: EditState,
    form: NoteForm,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&NoteId> {
        match &self.state {
            EditState::Editing(id) => Some(id),
            EditState::None => None,
        }
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn attach_image(&mut self, image: ImageUpload) {
        self.form.image = Some(image);
    }

    /// Bind the form to `note`, replacing any previous edit target
    pub fn select_edit(&mut self, note: &Note) {
        if let EditState::Editing(previous) = &self.state {
            debug!(%previous, next = %note.id, "Replacing edit target");
        }
        self.state = EditState::Editing(note.id.clone());
        self.form = NoteForm {
            name: note.name.clone(),
            description: note.description.clone(),
            image: None,
        };
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Back to an empty create form
    pub fn reset(&mut self) {
        self.state = EditState::None;
        self.form = NoteForm::default();
    }

    /// Validate required fields and bind the contents to create or update
    pub fn submission(&self) -> Result<Submission, DomainError> {
        let name = self.form.name.trim();
        let description = self.form.description.trim();

        if name.is_empty() {
            return Err(DomainError::Validation("Note name is required".to_string()));
        }
        if description.is_empty() {
            return Err(DomainError::Validation(
                "Note description is required".to_string(),
            ));
        }

        let name = name.to_string();
        let description = description.to_string();
        let image = self.form.image.clone();

        Ok(match &self.state {
            EditState::None => Submission::Create {
                name,
                description,
                image,
            },
            EditState::Editing(id) => Submission::Update {
                id: id.clone(),
                name,
                description,
                image,
            },
        })
    }
}
