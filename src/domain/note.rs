// src/domain/note.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque note identifier assigned by the data API on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Note as stored by the data API.
///
/// `image` holds the object-storage key of the attached image, never a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Note {
    /// Image key, if one is set and non-empty
    pub fn image_key(&self) -> Option<&str> {
        self.image.as_deref().filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNoteInput {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNoteInput {
    pub id: NoteId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteNoteInput {
    pub id: NoteId,
}

/// File selected in the form for upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// How a row's image is displayed after the fetch resolved it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "url", rename_all = "snake_case")]
pub enum ImageDisplay {
    None,
    Url(String),
    Unavailable,
}

/// One row of the in-memory note list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRow {
    #[serde(flatten)]
    pub note: Note,
    #[serde(rename = "image_display")]
    pub image: ImageDisplay,
}

impl NoteRow {
    pub fn id(&self) -> &NoteId {
        &self.note.id
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.image {
            ImageDisplay::Url(url) => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_create_input_without_image_when_serializing_then_image_is_null() {
        let input = CreateNoteInput {
            name: "A".to_string(),
            description: "B".to_string(),
            image: None,
        };

        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"name": "A", "description": "B", "image": null})
        );
    }

    #[test]
    fn given_wire_note_without_image_field_when_deserializing_then_image_is_none() {
        let json = r#"{"id": "n-1", "name": "A", "description": "B"}"#;

        let note: Note = serde_json::from_str(json).unwrap();

        assert_eq!(note.id, NoteId::new("n-1"));
        assert_eq!(note.image, None);
    }

    #[test]
    fn given_empty_image_key_when_reading_key_then_returns_none() {
        let note = Note {
            id: NoteId::new("1"),
            name: "A".to_string(),
            description: "B".to_string(),
            image: Some(String::new()),
        };

        assert_eq!(note.image_key(), None);
    }

    #[test]
    fn given_upload_when_debug_formatting_then_omits_bytes() {
        let upload = ImageUpload::new("cat.png", vec![0u8; 4096]);

        let debug = format!("{:?}", upload);

        assert!(debug.contains("cat.png"));
        assert!(debug.contains("4096"));
    }
}
