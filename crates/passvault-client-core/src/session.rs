use std::fmt;

use crate::claims::{SessionClaims, decode_claims};

/// In-memory session owned by the view controller.
///
/// Login state follows token presence; claims are decoded once when the
/// session is created and may be absent when the token payload is malformed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Option<SessionClaims>,
}

impl Session {
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let claims = decode_claims(&token);
        Self { token, claims }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.claims.as_ref().and_then(SessionClaims::subject)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().is_some_and(SessionClaims::is_admin)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::LoggedIn {
            admin: self.is_admin(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { admin: bool },
}

impl SessionState {
    #[must_use]
    pub fn of(session: Option<&Session>) -> Self {
        session.map_or(Self::LoggedOut, Session::state)
    }

    #[must_use]
    pub fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::LoggedIn { admin: true })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoggedOut => "logged_out",
            Self::LoggedIn { admin: false } => "logged_in",
            Self::LoggedIn { admin: true } => "logged_in_admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::test_tokens::token_with_claims;
    use serde_json::json;

    #[test]
    fn admin_claim_selects_admin_state() {
        let session = Session::from_token(token_with_claims(&json!({"sub": "root", "is_admin": true})));
        assert_eq!(session.state(), SessionState::LoggedIn { admin: true });
        assert_eq!(session.subject(), Some("root"));
    }

    #[test]
    fn undecodable_token_is_logged_in_without_admin() {
        let session = Session::from_token("opaque-token");
        assert!(session.claims().is_none());
        assert_eq!(session.state(), SessionState::LoggedIn { admin: false });
    }

    #[test]
    fn absent_session_is_logged_out() {
        assert_eq!(SessionState::of(None), SessionState::LoggedOut);
        assert!(!SessionState::LoggedOut.is_logged_in());
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::from_token("very-secret-token");
        assert!(!format!("{session:?}").contains("very-secret-token"));
    }
}
