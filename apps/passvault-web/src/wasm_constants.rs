pub(crate) const SHELL_ROOT_ID: &str = "passvault-root";
pub(crate) const AUTH_SECTION_ID: &str = "auth-section";
pub(crate) const APP_SECTION_ID: &str = "app-section";
pub(crate) const ADMIN_SECTION_ID: &str = "admin-section";
pub(crate) const MESSAGE_ID: &str = "message";
pub(crate) const CURRENT_USER_ID: &str = "current-user";

pub(crate) const LOGIN_FORM_ID: &str = "login-form";
pub(crate) const LOGIN_USERNAME_ID: &str = "login-username";
pub(crate) const LOGIN_PASSWORD_ID: &str = "login-password";
pub(crate) const LOGIN_SUBMIT_ID: &str = "login-submit";
pub(crate) const SHOW_REGISTER_ID: &str = "show-register";

pub(crate) const REGISTER_FORM_ID: &str = "register-form";
pub(crate) const REGISTER_USERNAME_ID: &str = "register-username";
pub(crate) const REGISTER_PASSWORD_ID: &str = "register-password";
pub(crate) const REGISTER_SUBMIT_ID: &str = "register-submit";
pub(crate) const SHOW_LOGIN_ID: &str = "show-login";

pub(crate) const LOGOUT_ID: &str = "logout";

pub(crate) const ADD_SERVICE_ID: &str = "service";
pub(crate) const ADD_USERNAME_ID: &str = "username";
pub(crate) const ADD_PASSWORD_ID: &str = "password";
pub(crate) const ADD_SUBMIT_ID: &str = "add-password";

pub(crate) const PASSWORDS_CONTAINER_ID: &str = "passwords-container";
pub(crate) const USERS_CONTAINER_ID: &str = "users-container";

pub(crate) const HIDDEN_CLASS: &str = "hidden";
pub(crate) const MESSAGE_ERROR_CLASS: &str = "error";
pub(crate) const MESSAGE_SUCCESS_CLASS: &str = "success";
