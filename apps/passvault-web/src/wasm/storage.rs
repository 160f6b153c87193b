use passvault_client_core::auth::{AUTH_TOKEN_STORAGE_KEY, TokenStore, non_empty_token};

/// Token persisted under a single `localStorage` key.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct LocalStorageTokenStore;

fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access local storage".to_string())?
        .ok_or_else(|| "local storage is unavailable".to_string())
}

impl TokenStore for LocalStorageTokenStore {
    type Error = String;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        let raw = local_storage()?
            .get_item(AUTH_TOKEN_STORAGE_KEY)
            .map_err(|_| "failed to read auth token from local storage".to_string())?;
        Ok(non_empty_token(raw.as_deref()))
    }

    fn save_token(&self, token: &str) -> Result<(), Self::Error> {
        local_storage()?
            .set_item(AUTH_TOKEN_STORAGE_KEY, token)
            .map_err(|_| "failed to persist auth token to local storage".to_string())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        local_storage()?
            .remove_item(AUTH_TOKEN_STORAGE_KEY)
            .map_err(|_| "failed to clear auth token from local storage".to_string())
    }
}
