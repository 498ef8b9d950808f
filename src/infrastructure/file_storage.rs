// src/infrastructure/file_storage.rs
use crate::application::ObjectStorage;
use crate::domain::DomainError;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use url::Url;

/// Object storage kept in a local directory.
///
/// Keys map to relative paths below the root (`/` separates directories) and
/// display URLs are `file://` URLs.
#[derive(Debug)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create storage directory {}", root.display()))?;
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve storage directory {}", root.display()))?;
        debug!(?root, "Using directory storage");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the object stored under `key`.
    ///
    /// Plain relative keys (`images/abc`) map to nested paths. Any other key
    /// is flattened into one percent-encoded file name directly below the
    /// root, so every non-empty key stays inside the root. Flattened names
    /// always contain `%` and plain keys never do, so the two cannot collide.
    pub fn object_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        if key.is_empty() {
            return Err(DomainError::Storage("Empty object key".to_string()));
        }
        if is_plain_key(key) {
            let mut path = self.root.clone();
            path.extend(key.split('/'));
            return Ok(path);
        }
        let file_name = match urlencoding::encode(key).into_owned() {
            dots if dots == "." || dots == ".." => dots.replace('.', "%2E"),
            encoded => encoded,
        };
        Ok(self.root.join(file_name))
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.contains(|c: char| c == '\\' || c == '%')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

impl ObjectStorage for DirectoryStorage {
    #[instrument(level = "debug", skip(self))]
    fn get_url(&self, key: &str) -> Result<String, DomainError> {
        let path = self.object_path(key)?;
        if !path.is_file() {
            return Err(DomainError::Storage(format!("No object stored under {:?}", key)));
        }
        Url::from_file_path(&path)
            .map(String::from)
            .map_err(|_| DomainError::Storage(format!("Cannot build URL for {}", path.display())))
    }

    #[instrument(level = "debug", skip(self, bytes), fields(len = bytes.len()))]
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DomainError::Storage(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        fs::write(&path, bytes)
            .map_err(|e| DomainError::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }

    #[instrument(level = "debug", skip(self))]
    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.object_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "No object to remove");
                Ok(())
            }
            Err(e) => Err(DomainError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
