use async_trait::async_trait;
use passvault_client_core::controller::UiHost;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BrowserHost;

#[async_trait(?Send)]
impl UiHost for BrowserHost {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|error| format!("{error:?}"))
    }
}
