// src/infrastructure/http_storage.rs
use crate::application::ObjectStorage;
use crate::domain::DomainError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// Object storage in a bucket exposed over plain HTTP: objects are written
/// with `PUT`, removed with `DELETE`, and read from their public URL.
#[derive(Debug)]
pub struct HttpObjectStorage {
    base: Url,
    client: Client,
}

impl HttpObjectStorage {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid storage base URL {}", base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Storage base URL cannot hold object paths: {}", base_url);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base, client })
    }

    /// Public URL of the object stored under `key`
    pub fn object_url(&self, key: &str) -> Result<Url, DomainError> {
        if key.is_empty() {
            return Err(DomainError::Storage("Empty object key".to_string()));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Storage(format!("Invalid base URL {}", self.base)))?
            .pop_if_empty()
            .extend(key.split('/'));
        Ok(url)
    }
}

fn transport_error(action: &str, key: &str, e: reqwest::Error) -> DomainError {
    DomainError::Network(format!("{} {:?} failed: {}", action, key, e))
}

impl ObjectStorage for HttpObjectStorage {
    fn get_url(&self, key: &str) -> Result<String, DomainError> {
        self.object_url(key).map(String::from)
    }

    #[instrument(level = "debug", skip(self, bytes), fields(len = bytes.len()))]
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let url = self.object_url(key)?;
        let response = self
            .client
            .put(url)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| transport_error("Upload", key, e))?;

        if !response.status().is_success() {
            return Err(DomainError::Storage(format!(
                "Upload {:?} HTTP {}",
                key,
                response.status()
            )));
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let url = self.object_url(key)?;
        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| transport_error("Remove", key, e))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(DomainError::Storage(format!("Remove {:?} HTTP {}", key, status)))
        }
    }
}
