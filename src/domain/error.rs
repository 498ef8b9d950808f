// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Note not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Not signed in")]
    Unauthenticated,
}
