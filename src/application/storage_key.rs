// src/application/storage_key.rs
use crate::domain::Note;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How image objects are keyed in object storage.
///
/// `NoteName` keys images by the note's name, so renaming a note loses its
/// image association. `Generated` assigns each upload a key of its own and
/// keeps it in the note's `image` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKeyPolicy {
    #[default]
    NoteName,
    Generated,
}

impl StorageKeyPolicy {
    /// Key under which a newly attached file for a note named `name` is stored
    pub fn upload_key(&self, name: &str) -> String {
        match self {
            StorageKeyPolicy::NoteName => name.to_string(),
            StorageKeyPolicy::Generated => format!("images/{}", Uuid::new_v4()),
        }
    }

    /// Key to resolve a display URL with, if the note has an image
    pub fn resolve_key<'a>(&self, note: &'a Note) -> Option<&'a str> {
        let key = note.image_key()?;
        match self {
            StorageKeyPolicy::NoteName => Some(note.name.as_str()),
            StorageKeyPolicy::Generated => Some(key),
        }
    }

    /// Key to remove when the note is deleted
    pub fn remove_key<'a>(&self, note: &'a Note) -> Option<&'a str> {
        match self {
            StorageKeyPolicy::NoteName => Some(note.name.as_str()),
            StorageKeyPolicy::Generated => note.image_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use rstest::rstest;

    fn note(name: &str, image: Option<&str>) -> Note {
        Note {
            id: NoteId::new("1"),
            name: name.to_string(),
            description: "d".to_string(),
            image: image.map(str::to_string),
        }
    }

    #[rstest]
    #[case(StorageKeyPolicy::NoteName, Some("old-name"), Some("renamed"))]
    #[case(StorageKeyPolicy::Generated, Some("images/abc"), Some("images/abc"))]
    #[case(StorageKeyPolicy::NoteName, None, None)]
    #[case(StorageKeyPolicy::Generated, None, None)]
    fn test_resolve_key(
        #[case] policy: StorageKeyPolicy,
        #[case] image: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let note = note("renamed", image);
        assert_eq!(policy.resolve_key(&note), expected);
    }

    #[rstest]
    #[case(StorageKeyPolicy::NoteName, None, Some("N"))]
    #[case(StorageKeyPolicy::NoteName, Some("N"), Some("N"))]
    #[case(StorageKeyPolicy::Generated, None, None)]
    #[case(StorageKeyPolicy::Generated, Some("images/abc"), Some("images/abc"))]
    fn test_remove_key(
        #[case] policy: StorageKeyPolicy,
        #[case] image: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let note = note("N", image);
        assert_eq!(policy.remove_key(&note), expected);
    }

    #[test]
    fn given_generated_policy_when_creating_upload_keys_then_keys_differ() {
        let policy = StorageKeyPolicy::Generated;

        let first = policy.upload_key("same");
        let second = policy.upload_key("same");

        assert!(first.starts_with("images/"));
        assert_ne!(first, second);
    }

    #[test]
    fn given_name_policy_when_creating_upload_key_then_uses_name() {
        assert_eq!(StorageKeyPolicy::NoteName.upload_key("Cat"), "Cat");
    }
}
