use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

use crate::auth::Credentials;
use crate::models::{EntryId, NewPasswordEntry};

pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const PASSWORDS_PATH: &str = "/passwords";
pub const ADMIN_USERS_PATH: &str = "/admin/users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    BearerToken,
}

/// User-level actions; each backend call belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Register,
    Login,
    ListPasswords,
    AddPassword,
    DeletePassword,
    CopyPassword,
    ListUsers,
    DeleteUser,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::ListPasswords => "list_passwords",
            Self::AddPassword => "add_password",
            Self::DeletePassword => "delete_password",
            Self::CopyPassword => "copy_password",
            Self::ListUsers => "list_users",
            Self::DeleteUser => "delete_user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiIntent {
    Register(Credentials),
    Login(Credentials),
    ListPasswords,
    AddPassword(NewPasswordEntry),
    DeletePassword { id: EntryId },
    ListUsers,
    DeleteUser { id: EntryId },
}

impl ApiIntent {
    #[must_use]
    pub fn action(&self) -> ActionKind {
        match self {
            Self::Register(_) => ActionKind::Register,
            Self::Login(_) => ActionKind::Login,
            Self::ListPasswords => ActionKind::ListPasswords,
            Self::AddPassword(_) => ActionKind::AddPassword,
            Self::DeletePassword { .. } => ActionKind::DeletePassword,
            Self::ListUsers => ActionKind::ListUsers,
            Self::DeleteUser { .. } => ActionKind::DeleteUser,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequestPlan {
    pub method: HttpMethod,
    pub path: String,
    pub auth: AuthRequirement,
    pub body: Option<Value>,
}

#[must_use]
pub fn plan_request(intent: &ApiIntent) -> HttpRequestPlan {
    match intent {
        ApiIntent::Register(credentials) => HttpRequestPlan {
            method: HttpMethod::Post,
            path: AUTH_REGISTER_PATH.to_string(),
            auth: AuthRequirement::None,
            body: Some(credentials_body(credentials)),
        },
        ApiIntent::Login(credentials) => HttpRequestPlan {
            method: HttpMethod::Post,
            path: AUTH_LOGIN_PATH.to_string(),
            auth: AuthRequirement::None,
            body: Some(credentials_body(credentials)),
        },
        ApiIntent::ListPasswords => HttpRequestPlan {
            method: HttpMethod::Get,
            path: PASSWORDS_PATH.to_string(),
            auth: AuthRequirement::BearerToken,
            body: None,
        },
        ApiIntent::AddPassword(entry) => HttpRequestPlan {
            method: HttpMethod::Post,
            path: PASSWORDS_PATH.to_string(),
            auth: AuthRequirement::BearerToken,
            body: Some(json!({
                "service": entry.service,
                "username": entry.username,
                "password": entry.password,
            })),
        },
        ApiIntent::DeletePassword { id } => HttpRequestPlan {
            method: HttpMethod::Delete,
            path: format!("{PASSWORDS_PATH}/{id}"),
            auth: AuthRequirement::BearerToken,
            body: None,
        },
        ApiIntent::ListUsers => HttpRequestPlan {
            method: HttpMethod::Get,
            path: ADMIN_USERS_PATH.to_string(),
            auth: AuthRequirement::BearerToken,
            body: None,
        },
        ApiIntent::DeleteUser { id } => HttpRequestPlan {
            method: HttpMethod::Delete,
            path: format!("{ADMIN_USERS_PATH}/{id}"),
            auth: AuthRequirement::BearerToken,
            body: None,
        },
    }
}

fn credentials_body(credentials: &Credentials) -> Value {
    json!({
        "username": credentials.username,
        "password": credentials.password,
    })
}

#[must_use]
pub fn bearer_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The fetch itself failed; no HTTP status is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport_failed:{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Executes request plans. Futures are not `Send` because browser fetch
/// futures are not.
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn execute(
        &self,
        plan: &HttpRequestPlan,
        bearer_token: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network_error:{message}")]
    Network { message: String },
    #[error("http_{status}")]
    Http { status: u16, detail: Option<String> },
    #[error("decode_failed:{message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    /// Server-provided `detail` text, when the error body carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Http { status, .. } | Self::Decode { status, .. } => Some(*status),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::Network {
            message: error.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Extracts a string `detail` from a JSON error body. Structured details
/// (e.g. validation error arrays) are ignored so callers fall back to their
/// generic message.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

pub fn ensure_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        status: response.status,
        detail: extract_detail(&response.body),
    })
}

pub fn decode_json_response<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    let response = ensure_success(response)?;
    serde_json::from_str(&response.body).map_err(|error| ApiError::Decode {
        status: response.status,
        message: error.to_string(),
    })
}
