// src/application/auth.rs
use crate::domain::{DomainError, Session};

/// Authentication service wrapping the notes view
pub trait AuthProvider {
    /// Current session; the view is only built from a signed-in one
    fn session(&self) -> Session;

    /// End the current session
    fn sign_out(&mut self) -> Result<(), DomainError>;
}
