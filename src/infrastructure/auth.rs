// src/infrastructure/auth.rs
use crate::application::AuthProvider;
use crate::domain::{DomainError, Session, UserSession};
use crate::infrastructure::config::AuthConfig;
use tracing::info;

/// Session taken from configuration: a username and, for user-pool mode,
/// an already issued id token
#[derive(Debug)]
pub struct ConfigAuthProvider {
    session: Session,
}

impl ConfigAuthProvider {
    pub fn from_config(config: &AuthConfig) -> Self {
        let session = if config.username.trim().is_empty() {
            Session::SignedOut
        } else {
            Session::SignedIn(UserSession {
                username: config.username.trim().to_string(),
                id_token: Some(config.id_token.clone()).filter(|token| !token.is_empty()),
            })
        };
        Self { session }
    }
}

impl AuthProvider for ConfigAuthProvider {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn sign_out(&mut self) -> Result<(), DomainError> {
        if let Session::SignedIn(user) = &self.session {
            info!(username = %user.username, "Discarding session");
        }
        self.session = Session::SignedOut;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_username_and_token_when_building_then_signed_in_with_token() {
        let config = AuthConfig {
            username: " alice ".to_string(),
            id_token: "eyJ...".to_string(),
        };

        let auth = ConfigAuthProvider::from_config(&config);

        match auth.session() {
            Session::SignedIn(user) => {
                assert_eq!(user.username, "alice");
                assert_eq!(user.id_token.as_deref(), Some("eyJ..."));
            }
            Session::SignedOut => panic!("Expected signed-in session"),
        }
    }

    #[test]
    fn given_empty_username_when_building_then_signed_out() {
        let config = AuthConfig {
            username: String::new(),
            id_token: String::new(),
        };

        let auth = ConfigAuthProvider::from_config(&config);

        assert_eq!(auth.session(), Session::SignedOut);
    }

    #[test]
    fn given_signed_in_when_signing_out_then_session_ends() {
        let mut auth = ConfigAuthProvider::from_config(&AuthConfig::default());

        auth.sign_out().unwrap();

        assert!(!auth.session().is_signed_in());
    }
}
