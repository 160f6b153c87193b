use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::AuthInputError;

pub type EntryId = i64;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordEntry {
    pub id: EntryId,
    pub service: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /passwords`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewPasswordEntry {
    pub service: String,
    pub username: String,
    pub password: String,
}

impl NewPasswordEntry {
    pub fn new(service: &str, username: &str, password: &str) -> Result<Self, AuthInputError> {
        let service = service.trim();
        if service.is_empty() {
            return Err(AuthInputError::EmptyService);
        }
        if password.is_empty() {
            return Err(AuthInputError::EmptyPassword);
        }
        Ok(Self {
            service: service.to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for NewPasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewPasswordEntry")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAccount {
    pub id: EntryId,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_entry_decodes_backend_shape() {
        let entries: Vec<PasswordEntry> = serde_json::from_str(
            r#"[{"id": 7, "service": "mail", "username": "alice", "password": "s3cret"}]"#,
        )
        .expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 7);
        assert_eq!(entries[0].password, "s3cret");
        assert!(!format!("{:?}", entries[0]).contains("s3cret"));
    }

    #[test]
    fn user_account_admin_flag_defaults_false() {
        let user: UserAccount =
            serde_json::from_str(r#"{"id": 3, "username": "bob"}"#).expect("user");
        assert!(!user.is_admin);
    }

    #[test]
    fn login_response_ignores_extra_fields() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"access_token": "a.b.c", "token_type": "bearer", "expires_in": 1800}"#,
        )
        .expect("login response");
        assert_eq!(response.access_token, "a.b.c");
    }

    #[test]
    fn new_password_entry_requires_service_and_password() {
        assert_eq!(
            NewPasswordEntry::new("  ", "alice", "pw").expect_err("blank service"),
            AuthInputError::EmptyService
        );
        assert_eq!(
            NewPasswordEntry::new("mail", "alice", "").expect_err("blank password"),
            AuthInputError::EmptyPassword
        );
        let entry = NewPasswordEntry::new(" mail ", " alice ", "pw").expect("entry");
        assert_eq!(entry.service, "mail");
        assert_eq!(entry.username, "alice");
    }
}
