use super::*;

/// Mounts the shell skeleton unless the host page already carries the regions.
pub(super) fn ensure_shell_dom() -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;
    if document.get_element_by_id(AUTH_SECTION_ID).is_some() {
        return Ok(());
    }

    let root = match document.get_element_by_id(SHELL_ROOT_ID) {
        Some(existing) => existing,
        None => {
            let body = document
                .body()
                .ok_or_else(|| "document body is unavailable".to_string())?;
            let element = document
                .create_element("main")
                .map_err(|_| "failed to create shell root".to_string())?;
            element.set_id(SHELL_ROOT_ID);
            body.append_child(&element)
                .map_err(|_| "failed to append shell root".to_string())?;
            element
        }
    };
    root.set_inner_html(&shell_markup());
    Ok(())
}

pub(super) fn bind_shell_handlers() -> Result<(), String> {
    let document = document()?;
    let element = |id: &str| {
        document
            .get_element_by_id(id)
            .ok_or_else(|| format!("missing shell element #{id}"))
    };

    let login_button = element(LOGIN_SUBMIT_ID)?;
    let register_button = element(REGISTER_SUBMIT_ID)?;
    let show_login_button = element(SHOW_LOGIN_ID)?;
    let show_register_button = element(SHOW_REGISTER_ID)?;
    let logout_button = element(LOGOUT_ID)?;
    let add_button = element(ADD_SUBMIT_ID)?;
    let passwords_container = element(PASSWORDS_CONTAINER_ID)?;
    let users_container = element(USERS_CONTAINER_ID)?;

    LOGIN_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            submit_login_from_inputs();
        }));
        let _ = login_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    REGISTER_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            submit_register_from_inputs();
        }));
        let _ = register_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    SHOW_LOGIN_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            switch_auth_form(AuthForm::Login);
        }));
        let _ = show_login_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    SHOW_REGISTER_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            switch_auth_form(AuthForm::Register);
        }));
        let _ = show_register_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    LOGOUT_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            logout_session();
        }));
        let _ = logout_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    ADD_PASSWORD_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            submit_add_password_from_inputs();
        }));
        let _ = add_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    // List rows are re-rendered wholesale, so clicks are delegated from the
    // containers and resolved through data attributes.
    PASSWORDS_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            dispatch_list_click(event);
        }));
        let _ = passwords_container
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    USERS_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            dispatch_list_click(event);
        }));
        let _ = users_container
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    Ok(())
}

pub(super) fn render_view(controller: &WebController) {
    let Ok(document) = document() else {
        return;
    };
    let view = controller.view();

    set_hidden(&document, AUTH_SECTION_ID, !view.auth_visible);
    set_hidden(&document, APP_SECTION_ID, !view.app_visible);
    set_hidden(&document, ADMIN_SECTION_ID, !view.admin_visible);
    set_hidden(&document, LOGIN_FORM_ID, view.auth_form != AuthForm::Login);
    set_hidden(&document, REGISTER_FORM_ID, view.auth_form != AuthForm::Register);

    if let Some(current_user) = html_element(&document, CURRENT_USER_ID) {
        let label = match controller.session().and_then(|session| session.subject()) {
            Some(subject) if view.admin_visible => format!("Signed in as {subject} (admin)"),
            Some(subject) => format!("Signed in as {subject}"),
            None => String::new(),
        };
        current_user.set_inner_text(&label);
    }

    if let Some(container) = document.get_element_by_id(PASSWORDS_CONTAINER_ID) {
        container.set_inner_html(&controller.passwords_html());
    }
    if let Some(container) = document.get_element_by_id(USERS_CONTAINER_ID) {
        container.set_inner_html(&controller.users_html());
    }

    render_message(&document, controller);
}

fn render_message(document: &web_sys::Document, controller: &WebController) {
    let Some(element) = html_element(document, MESSAGE_ID) else {
        return;
    };
    let class_list = element.class_list();
    let _ = class_list.remove_2(MESSAGE_ERROR_CLASS, MESSAGE_SUCCESS_CLASS);
    DISPLAYED_MESSAGE.with(|displayed| displayed.set(controller.message().map(|message| message.id)));
    match controller.message() {
        Some(message) => {
            element.set_inner_text(&message.text);
            let class = if message.is_error() {
                MESSAGE_ERROR_CLASS
            } else {
                MESSAGE_SUCCESS_CLASS
            };
            let _ = class_list.add_1(class);
        }
        None => element.set_inner_text(""),
    }
}

/// Empties the message banner without touching controller state.
pub(super) fn blank_message_banner() {
    let Ok(document) = document() else {
        return;
    };
    if let Some(element) = html_element(&document, MESSAGE_ID) {
        let _ = element
            .class_list()
            .remove_2(MESSAGE_ERROR_CLASS, MESSAGE_SUCCESS_CLASS);
        element.set_inner_text("");
    }
    DISPLAYED_MESSAGE.with(|displayed| displayed.set(None));
}

pub(super) fn input_value(id: &str) -> String {
    document()
        .ok()
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub(super) fn clear_inputs(ids: &[&str]) {
    let Ok(document) = document() else {
        return;
    };
    for id in ids {
        if let Some(input) = document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value("");
        }
    }
}

pub(super) fn set_control_disabled(id: Option<&str>, disabled: bool) {
    let Some(id) = id else {
        return;
    };
    if let Some(button) = document()
        .ok()
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(disabled);
    }
}

fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
    if let Some(element) = document.get_element_by_id(id) {
        let _ = element.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
    }
}

fn html_element(document: &web_sys::Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn document() -> Result<web_sys::Document, String> {
    web_sys::window()
        .ok_or_else(|| "window is unavailable".to_string())?
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}
