// src/infrastructure/config.rs
use crate::application::StorageKeyPolicy;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS, LOCAL_DATABASE_FILE_NAME,
    LOCAL_STORAGE_DIR_NAME,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for notesview
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// SQLite file on this machine
    #[default]
    Local,
    /// Remote GraphQL data API
    Graphql,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    ApiKey,
    UserPool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Directory,
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub kind: StorageKind,
    /// Directory for the directory backend; empty means the data directory
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub key_policy: StorageKeyPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct LocalConfig {
    /// SQLite file; empty means the data directory
    #[serde(default)]
    pub database: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub id_token: String,
}

// Default value functions
fn default_timeout_secs() -> u64 { DEFAULT_REQUEST_TIMEOUT_SECS }
fn default_username() -> String { "local".to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            endpoint: String::new(),
            api_key: String::new(),
            auth_mode: AuthMode::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            path: String::new(),
            base_url: String::new(),
            key_policy: StorageKeyPolicy::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            id_token: String::new(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from an explicit path, or from the default location if a file
    /// exists there, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Self::default_path()?;
        if default_path.exists() {
            debug!(?default_path, "Loading default config");
            Self::load(default_path)
        } else {
            debug!(?default_path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// SQLite file of the local backend
    pub fn database_path(&self) -> Result<PathBuf> {
        if !self.local.database.is_empty() {
            return Ok(PathBuf::from(&self.local.database));
        }
        Ok(data_dir()?.join(LOCAL_DATABASE_FILE_NAME))
    }

    /// Root directory of the directory storage backend
    pub fn storage_path(&self) -> Result<PathBuf> {
        if !self.storage.path.is_empty() {
            return Ok(PathBuf::from(&self.storage.path));
        }
        Ok(data_dir()?.join(LOCAL_STORAGE_DIR_NAME))
    }

    /// Reject combinations that cannot be wired into a backend
    pub fn validate(&self) -> Result<()> {
        if self.backend.kind == BackendKind::Graphql {
            if self.backend.endpoint.is_empty() {
                bail!("backend.endpoint is required for the graphql backend");
            }
            match self.backend.auth_mode {
                AuthMode::ApiKey if self.backend.api_key.is_empty() => {
                    bail!("backend.api_key is required when auth_mode = \"api_key\"")
                }
                AuthMode::UserPool if self.auth.id_token.is_empty() => {
                    bail!("auth.id_token is required when auth_mode = \"user_pool\"")
                }
                _ => {}
            }
        }
        if self.storage.kind == StorageKind::Http && self.storage.base_url.is_empty() {
            bail!("storage.base_url is required for the http storage backend");
        }
        Ok(())
    }
}

fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not find data directory")?;
    Ok(data_dir.join(APP_DIR_NAME))
}
