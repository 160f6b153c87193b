use std::time::Duration;

use crate::api::{ActionKind, ApiError};

/// How long a transient message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

pub const MSG_REGISTERED: &str = "Registration successful! Please sign in.";
pub const MSG_PASSWORD_SAVED: &str = "Password saved!";
pub const MSG_PASSWORD_DELETED: &str = "Password deleted";
pub const MSG_PASSWORD_COPIED: &str = "Password copied!";
pub const MSG_USER_DELETED: &str = "User deleted";

pub const MSG_NETWORK_ERROR: &str = "Network error";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MSG_UNKNOWN_ERROR: &str = "Unknown error";
pub const MSG_LOAD_PASSWORDS_FAILED: &str = "Failed to load passwords";
pub const MSG_SAVE_PASSWORD_FAILED: &str = "Failed to save password";
pub const MSG_DELETE_PASSWORD_FAILED: &str = "Failed to delete password";
pub const MSG_LOAD_USERS_FAILED: &str = "Failed to load users";
pub const MSG_COPY_FAILED: &str = "Copy failed";

pub const PROMPT_DELETE_PASSWORD: &str = "Delete password?";
pub const PROMPT_DELETE_USER: &str = "Delete user? This action cannot be undone!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub id: u64,
    pub text: String,
    pub tone: MessageTone,
}

impl TransientMessage {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.tone == MessageTone::Error
    }
}

/// User-facing text for a failed backend call.
#[must_use]
pub fn failure_message(action: ActionKind, error: &ApiError) -> String {
    if error.is_network() {
        return MSG_NETWORK_ERROR.to_string();
    }
    let detail = error.detail();
    match action {
        ActionKind::Register | ActionKind::DeleteUser => {
            detail.unwrap_or(MSG_UNKNOWN_ERROR).to_string()
        }
        ActionKind::Login => MSG_INVALID_CREDENTIALS.to_string(),
        ActionKind::ListPasswords => MSG_LOAD_PASSWORDS_FAILED.to_string(),
        ActionKind::AddPassword => MSG_SAVE_PASSWORD_FAILED.to_string(),
        ActionKind::DeletePassword => MSG_DELETE_PASSWORD_FAILED.to_string(),
        ActionKind::ListUsers => format!(
            "{MSG_LOAD_USERS_FAILED}: {}",
            detail.unwrap_or(MSG_UNKNOWN_ERROR)
        ),
        ActionKind::CopyPassword => MSG_COPY_FAILED.to_string(),
    }
}
