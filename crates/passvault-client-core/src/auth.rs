use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;

use serde::Serialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const ENV_API_BASE_URL: &str = "PASSVAULT_API_BASE_URL";

/// Single persistent key holding the bearer token.
pub const AUTH_TOKEN_STORAGE_KEY: &str = "auth_token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthInputError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("service must not be empty")]
    EmptyService,
}

/// Username/password pair sent to `/auth/register` and `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, AuthInputError> {
        Ok(Self {
            username: normalize_username(username)?,
            password: validate_password(password)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Durable backing for the bearer token. Implementations overwrite on save and
/// treat clearing an absent token as success.
pub trait TokenStore {
    type Error;

    fn load_token(&self) -> Result<Option<String>, Self::Error>;
    fn save_token(&self, token: &str) -> Result<(), Self::Error>;
    fn clear_token(&self) -> Result<(), Self::Error>;
}

impl<T: TokenStore + ?Sized> TokenStore for &T {
    type Error = T::Error;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        (**self).load_token()
    }

    fn save_token(&self, token: &str) -> Result<(), Self::Error> {
        (**self).save_token(token)
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        (**self).clear_token()
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    type Error = Infallible;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        Ok(non_empty_token(self.token.borrow().as_deref()))
    }

    fn save_token(&self, token: &str) -> Result<(), Self::Error> {
        self.token.replace(Some(token.to_string()));
        Ok(())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        self.token.replace(None);
        Ok(())
    }
}

/// Blank stored values load as absent.
#[must_use]
pub fn non_empty_token(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

pub fn resolve_api_base_url() -> Result<(String, &'static str), AuthInputError> {
    if let Some(base_url) = env_non_empty(ENV_API_BASE_URL) {
        return normalize_base_url(&base_url).map(|normalized| (normalized, ENV_API_BASE_URL));
    }
    normalize_base_url(DEFAULT_API_BASE_URL).map(|normalized| (normalized, "default_local"))
}

pub fn normalize_base_url(raw: &str) -> Result<String, AuthInputError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthInputError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AuthInputError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(AuthInputError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(AuthInputError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

pub fn normalize_username(raw: &str) -> Result<String, AuthInputError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(AuthInputError::EmptyUsername);
    }
    Ok(normalized.to_string())
}

// Passwords are sent exactly as typed; only emptiness is rejected.
pub fn validate_password(raw: &str) -> Result<String, AuthInputError> {
    if raw.is_empty() {
        return Err(AuthInputError::EmptyPassword);
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = std::env::var(ENV_API_BASE_URL).ok();
        match value {
            Some(value) => unsafe { std::env::set_var(ENV_API_BASE_URL, value) },
            None => unsafe { std::env::remove_var(ENV_API_BASE_URL) },
        }

        let result = test();

        match previous {
            Some(value) => unsafe { std::env::set_var(ENV_API_BASE_URL, value) },
            None => unsafe { std::env::remove_var(ENV_API_BASE_URL) },
        }

        result
    }

    #[test]
    fn normalize_base_url_trims_and_drops_trailing_slash() {
        let normalized = normalize_base_url(" https://vault.example.com/ ").expect("valid base url");
        assert_eq!(normalized, "https://vault.example.com");
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        let error = normalize_base_url("vault.example.com").expect_err("expected invalid url");
        assert_eq!(error, AuthInputError::InvalidBaseUrl);
    }

    #[test]
    fn normalize_base_url_rejects_missing_host() {
        let error = normalize_base_url("https:///passwords").expect_err("expected invalid url");
        assert_eq!(error, AuthInputError::InvalidBaseUrl);
    }

    #[test]
    fn resolve_api_base_url_defaults_local() {
        with_env(None, || {
            let (resolved, source) = resolve_api_base_url().expect("default local url");
            assert_eq!(resolved, DEFAULT_API_BASE_URL);
            assert_eq!(source, "default_local");
        });
    }

    #[test]
    fn resolve_api_base_url_prefers_env() {
        with_env(Some("https://vault.staging.example.com/"), || {
            let (resolved, source) = resolve_api_base_url().expect("env url");
            assert_eq!(resolved, "https://vault.staging.example.com");
            assert_eq!(source, ENV_API_BASE_URL);
        });
    }

    #[test]
    fn credentials_trim_username_but_keep_password_verbatim() {
        let credentials = Credentials::new("  alice ", " secret ").expect("valid credentials");
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, " secret ");
    }

    #[test]
    fn credentials_reject_blank_fields() {
        assert_eq!(
            Credentials::new("   ", "pw").expect_err("blank username"),
            AuthInputError::EmptyUsername
        );
        assert_eq!(
            Credentials::new("alice", "").expect_err("blank password"),
            AuthInputError::EmptyPassword
        );
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("alice", "hunter2").expect("valid credentials");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn memory_store_overwrites_and_clears() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load_token().expect("load"), None);

        store.save_token("first").expect("save");
        store.save_token("second").expect("save");
        assert_eq!(store.load_token().expect("load").as_deref(), Some("second"));

        store.clear_token().expect("clear");
        store.clear_token().expect("clearing twice is fine");
        assert_eq!(store.load_token().expect("load"), None);
    }

    #[test]
    fn blank_stored_token_loads_as_absent() {
        let store = MemoryTokenStore::with_token("   ");
        assert_eq!(store.load_token().expect("load"), None);
    }
}
