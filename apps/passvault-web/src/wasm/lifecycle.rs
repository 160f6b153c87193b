use super::*;

pub(super) fn set_boot_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|diagnostics| {
        let mut diagnostics = diagnostics.borrow_mut();
        diagnostics.phase = phase.to_string();
        diagnostics.detail = detail.to_string();
    });
    web_sys::console::log_1(&JsValue::from_str(&format!("passvault boot {phase}: {detail}")));
}

pub(super) fn set_boot_error(error: &str) {
    DIAGNOSTICS.with(|diagnostics| {
        let mut diagnostics = diagnostics.borrow_mut();
        diagnostics.phase = "error".to_string();
        diagnostics.last_error = Some(error.to_string());
    });
    web_sys::console::error_1(&JsValue::from_str(&format!("passvault boot failed: {error}")));
}

fn record_error(error: &str) {
    DIAGNOSTICS.with(|diagnostics| diagnostics.borrow_mut().last_error = Some(error.to_string()));
    web_sys::console::warn_1(&JsValue::from_str(error));
}

fn controller_handle() -> Option<SharedController> {
    CONTROLLER.with(|slot| slot.borrow().clone())
}

/// Runs `task` for `action` unless the same action is still pending. The
/// triggering control stays disabled until the task finishes.
pub(super) fn spawn_action<F, Fut>(action: ActionKind, trigger_id: Option<&'static str>, task: F)
where
    F: FnOnce(SharedController) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let Some(controller) = controller_handle() else {
        return;
    };
    let Some(guard) = IN_FLIGHT.with(|in_flight| in_flight.try_begin(action)) else {
        web_sys::console::debug_1(&JsValue::from_str(&format!(
            "{} already pending",
            action.as_str()
        )));
        return;
    };

    set_control_disabled(trigger_id, true);
    spawn_local(async move {
        task(controller).await;
        set_control_disabled(trigger_id, false);
        drop(guard);
    });
}

/// Re-renders and schedules expiry for a newly posted message.
pub(super) fn sync_view(controller: &WebController) {
    render_view(controller);
    let Some(message_id) = controller.message().map(|message| message.id) else {
        return;
    };
    if LAST_SCHEDULED_MESSAGE.with(|last| last.replace(message_id)) == message_id {
        return;
    }
    spawn_local(async move {
        sleep(MESSAGE_TTL).await;
        let Some(controller) = controller_handle() else {
            return;
        };
        let displayed = DISPLAYED_MESSAGE.with(Cell::get);
        let free = controller.try_lock();
        let step = expiry_step(free.is_some(), displayed, message_id);
        if let Some(mut free) = free {
            if free.expire_message(message_id) {
                render_view(&free);
            }
            return;
        }
        if step == ExpiryStep::BlankBannerThenExpire {
            blank_message_banner();
        }
        let mut controller = controller.lock().await;
        if controller.expire_message(message_id) {
            render_view(&controller);
        }
    });
}

pub(super) fn submit_login_from_inputs() {
    let username = input_value(LOGIN_USERNAME_ID);
    let password = input_value(LOGIN_PASSWORD_ID);
    spawn_action(ActionKind::Login, Some(LOGIN_SUBMIT_ID), move |controller| async move {
        let mut controller = controller.lock().await;
        if let Err(error) = controller.login(&username, &password).await {
            record_error(&format!("failed to persist auth token: {error}"));
        }
        if controller.state().is_logged_in() {
            clear_inputs(&[LOGIN_PASSWORD_ID]);
        }
        sync_view(&controller);
    });
}

pub(super) fn submit_register_from_inputs() {
    let username = input_value(REGISTER_USERNAME_ID);
    let password = input_value(REGISTER_PASSWORD_ID);
    spawn_action(
        ActionKind::Register,
        Some(REGISTER_SUBMIT_ID),
        move |controller| async move {
            let mut controller = controller.lock().await;
            if controller.register(&username, &password).await == ActionOutcome::Completed {
                clear_inputs(&[REGISTER_USERNAME_ID, REGISTER_PASSWORD_ID]);
            }
            sync_view(&controller);
        },
    );
}

pub(super) fn submit_add_password_from_inputs() {
    let service = input_value(ADD_SERVICE_ID);
    let username = input_value(ADD_USERNAME_ID);
    let password = input_value(ADD_PASSWORD_ID);
    spawn_action(
        ActionKind::AddPassword,
        Some(ADD_SUBMIT_ID),
        move |controller| async move {
            let mut controller = controller.lock().await;
            if controller.add_password(&service, &username, &password).await
                == ActionOutcome::Completed
            {
                clear_inputs(&[ADD_SERVICE_ID, ADD_USERNAME_ID, ADD_PASSWORD_ID]);
            }
            sync_view(&controller);
        },
    );
}

/// Auth form switches are ignored while a request holds the controller.
pub(super) fn switch_auth_form(form: AuthForm) {
    let Some(controller) = controller_handle() else {
        return;
    };
    let Some(mut controller) = controller.try_lock() else {
        return;
    };
    match form {
        AuthForm::Login => controller.show_login(),
        AuthForm::Register => controller.show_register(),
    }
    render_view(&controller);
}

pub(super) fn logout_session() {
    let Some(controller) = controller_handle() else {
        return;
    };
    spawn_local(async move {
        let mut controller = controller.lock().await;
        if let Err(error) = controller.logout() {
            record_error(&format!("failed to clear auth token: {error}"));
        }
        clear_inputs(&[LOGIN_USERNAME_ID, LOGIN_PASSWORD_ID]);
        sync_view(&controller);
    });
}

pub(super) fn dispatch_list_click(event: web_sys::Event) {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };
    let Ok(Some(control)) = target.closest("[data-action]") else {
        return;
    };
    let action = control.get_attribute("data-action").unwrap_or_default();
    let id = control.get_attribute("data-id").unwrap_or_default();
    let Some(shell_action) = ShellAction::parse(&action, &id) else {
        return;
    };

    match shell_action {
        ShellAction::CopyPassword(id) => {
            spawn_action(ActionKind::CopyPassword, None, move |controller| async move {
                let mut controller = controller.lock().await;
                controller.copy_password(id).await;
                sync_view(&controller);
            });
        }
        ShellAction::DeletePassword(id) => {
            spawn_action(ActionKind::DeletePassword, None, move |controller| async move {
                let mut controller = controller.lock().await;
                controller.delete_password(id).await;
                sync_view(&controller);
            });
        }
        ShellAction::DeleteUser(id) => {
            spawn_action(ActionKind::DeleteUser, None, move |controller| async move {
                let mut controller = controller.lock().await;
                controller.delete_user(id).await;
                sync_view(&controller);
            });
        }
    }
}
