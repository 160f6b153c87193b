use maud::html;

use crate::wasm_constants::*;

/// Static skeleton mounted when the host page does not provide the regions.
pub(crate) fn shell_markup() -> String {
    let markup = html! {
        section id=(AUTH_SECTION_ID) {
            h1 { "PassVault" }
            div id=(LOGIN_FORM_ID) {
                h2 { "Sign in" }
                input id=(LOGIN_USERNAME_ID) type="text" placeholder="Username" autocomplete="username";
                input id=(LOGIN_PASSWORD_ID) type="password" placeholder="Password" autocomplete="current-password";
                button id=(LOGIN_SUBMIT_ID) type="button" { "Sign in" }
                p { "No account? " button id=(SHOW_REGISTER_ID) type="button" class="link" { "Register" } }
            }
            div id=(REGISTER_FORM_ID) class=(HIDDEN_CLASS) {
                h2 { "Register" }
                input id=(REGISTER_USERNAME_ID) type="text" placeholder="Username" autocomplete="username";
                input id=(REGISTER_PASSWORD_ID) type="password" placeholder="Password" autocomplete="new-password";
                button id=(REGISTER_SUBMIT_ID) type="button" { "Register" }
                p { "Have an account? " button id=(SHOW_LOGIN_ID) type="button" class="link" { "Sign in" } }
            }
        }
        section id=(APP_SECTION_ID) class=(HIDDEN_CLASS) {
            header {
                span id=(CURRENT_USER_ID) {}
                button id=(LOGOUT_ID) type="button" { "Log out" }
            }
            h2 { "Add password" }
            input id=(ADD_SERVICE_ID) type="text" placeholder="Service";
            input id=(ADD_USERNAME_ID) type="text" placeholder="Login";
            input id=(ADD_PASSWORD_ID) type="password" placeholder="Password";
            button id=(ADD_SUBMIT_ID) type="button" { "Save" }
            h2 { "Saved passwords" }
            div id=(PASSWORDS_CONTAINER_ID) {}
        }
        section id=(ADMIN_SECTION_ID) class=(HIDDEN_CLASS) {
            h2 { "Users" }
            div id=(USERS_CONTAINER_ID) {}
        }
        div id=(MESSAGE_ID) role="status" {}
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_contains_every_bound_id() {
        let markup = shell_markup();
        for id in [
            AUTH_SECTION_ID,
            APP_SECTION_ID,
            ADMIN_SECTION_ID,
            MESSAGE_ID,
            CURRENT_USER_ID,
            LOGIN_FORM_ID,
            LOGIN_USERNAME_ID,
            LOGIN_PASSWORD_ID,
            LOGIN_SUBMIT_ID,
            SHOW_REGISTER_ID,
            REGISTER_FORM_ID,
            REGISTER_USERNAME_ID,
            REGISTER_PASSWORD_ID,
            REGISTER_SUBMIT_ID,
            SHOW_LOGIN_ID,
            LOGOUT_ID,
            ADD_SERVICE_ID,
            ADD_USERNAME_ID,
            ADD_PASSWORD_ID,
            ADD_SUBMIT_ID,
            PASSWORDS_CONTAINER_ID,
            USERS_CONTAINER_ID,
        ] {
            assert!(markup.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
    }

    #[test]
    fn skeleton_starts_logged_out() {
        let markup = shell_markup();
        assert!(markup.contains(r#"<section id="app-section" class="hidden">"#));
        assert!(markup.contains(r#"<section id="admin-section" class="hidden">"#));
        assert!(markup.contains(r#"<section id="auth-section">"#));
    }
}
