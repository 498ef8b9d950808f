// src/infrastructure/mod.rs
pub mod auth;
pub mod config;
pub mod file_storage;
pub mod graphql;
pub mod http_storage;
pub mod renderer;
pub mod sqlite;

pub use auth::ConfigAuthProvider;
pub use config::Config;
pub use file_storage::DirectoryStorage;
pub use graphql::{Credentials, GraphqlDataApi};
pub use http_storage::HttpObjectStorage;
pub use sqlite::SqliteDataApi;
