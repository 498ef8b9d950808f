// src/domain/session.rs

/// Credentials of a signed-in user
#[derive(Clone, PartialEq, Eq)]
pub struct UserSession {
    pub username: String,
    /// Token sent to the data API in user-pool mode
    pub id_token: Option<String>,
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("username", &self.username)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    SignedIn(UserSession),
    SignedOut,
}

impl Session {
    pub fn signed_in(username: impl Into<String>) -> Self {
        Session::SignedIn(UserSession {
            username: username.into(),
            id_token: None,
        })
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::SignedIn(user) => Some(&user.username),
            Session::SignedOut => None,
        }
    }
}
