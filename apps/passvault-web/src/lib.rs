#[cfg(any(target_arch = "wasm32", test))]
mod message_expiry;
#[cfg(any(target_arch = "wasm32", test))]
mod shell_action;
#[cfg(any(target_arch = "wasm32", test))]
mod shell_markup;
#[cfg(any(target_arch = "wasm32", test))]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::rc::Rc;

    use futures::lock::Mutex;
    use gloo_timers::future::sleep;
    use passvault_client_core::api::ActionKind;
    use passvault_client_core::controller::{
        ActionOutcome, AuthForm, InFlightActions, ViewController,
    };
    use passvault_client_core::messages::MESSAGE_TTL;
    use serde::Serialize;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement};

    use crate::message_expiry::{ExpiryStep, expiry_step};
    use crate::shell_action::ShellAction;
    use crate::shell_markup::shell_markup;
    use crate::wasm_constants::*;

    mod dom;
    mod host;
    mod lifecycle;
    mod network;
    mod storage;

    use dom::*;
    use host::BrowserHost;
    use lifecycle::*;
    use network::GlooTransport;
    use storage::LocalStorageTokenStore;

    type WebController = ViewController<LocalStorageTokenStore, GlooTransport, BrowserHost>;
    type SharedController = Rc<Mutex<WebController>>;

    thread_local! {
        static CONTROLLER: RefCell<Option<SharedController>> = const { RefCell::new(None) };
        static IN_FLIGHT: InFlightActions = InFlightActions::default();
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static LAST_SCHEDULED_MESSAGE: Cell<u64> = const { Cell::new(0) };
        static DISPLAYED_MESSAGE: Cell<Option<u64>> = const { Cell::new(None) };
        static LOGIN_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static REGISTER_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SHOW_LOGIN_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SHOW_REGISTER_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static LOGOUT_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ADD_PASSWORD_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static PASSWORDS_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static USERS_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[derive(Debug, Clone, Default, Serialize)]
    struct BootDiagnostics {
        phase: String,
        detail: String,
        session_state: Option<String>,
        last_error: Option<String>,
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_boot_phase("booting", "initializing PassVault web shell");
        spawn_local(async {
            if let Err(error) = boot().await {
                set_boot_error(&error);
            }
        });
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    async fn boot() -> Result<(), String> {
        ensure_shell_dom()?;
        bind_shell_handlers()?;

        let controller: SharedController = Rc::new(Mutex::new(ViewController::new(
            LocalStorageTokenStore,
            GlooTransport,
            BrowserHost,
        )));
        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&controller)));

        let mut controller = controller.lock().await;
        let state = controller.boot().await?;
        sync_view(&controller);

        DIAGNOSTICS.with(|diagnostics| {
            diagnostics.borrow_mut().session_state = Some(state.as_str().to_string());
        });
        set_boot_phase("ready", "PassVault web shell ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::boot_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"web shell diagnostics only available on wasm\"}".to_string()
}
