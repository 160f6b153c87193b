//! Session and view controller.
//!
//! The controller owns the in-memory [`Session`], decides which UI regions are
//! visible, and drives every backend call. Lists are only ever replaced by the
//! response of a successful fetch; mutations never patch them locally.
//!
//! Admin gating reads the unverified `is_admin` claim. That gate is cosmetic:
//! the backend authorizes `/admin/*` calls from the bearer token on every
//! request, so a forged claim only reveals an empty, failing panel.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::{
    ActionKind, ApiError, ApiIntent, ApiResponse, ApiTransport, AuthRequirement,
    decode_json_response, ensure_success, plan_request,
};
use crate::auth::{Credentials, TokenStore, non_empty_token};
use crate::messages::{
    MSG_COPY_FAILED, MSG_PASSWORD_COPIED, MSG_PASSWORD_DELETED, MSG_PASSWORD_SAVED,
    MSG_REGISTERED, MSG_USER_DELETED, MessageTone, PROMPT_DELETE_PASSWORD, PROMPT_DELETE_USER,
    TransientMessage, failure_message,
};
use crate::models::{EntryId, LoginResponse, NewPasswordEntry, PasswordEntry, UserAccount};
use crate::render::{render_password_list, render_user_list};
use crate::session::{Session, SessionState};

mod in_flight;

pub use in_flight::{InFlightActions, InFlightGuard};

/// Interactive hooks supplied by the hosting shell.
#[async_trait(?Send)]
pub trait UiHost {
    /// Asks the user to confirm a destructive action.
    fn confirm(&self, prompt: &str) -> bool;
    async fn write_clipboard(&self, text: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub auth_visible: bool,
    pub app_visible: bool,
    pub admin_visible: bool,
    pub auth_form: AuthForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// Validation or the backend call failed; a transient error was posted.
    Failed,
    /// The user declined the confirmation prompt.
    Declined,
    /// Not applicable in the current session state; nothing was sent.
    Skipped,
}

pub struct ViewController<S, T, H> {
    store: S,
    transport: T,
    host: H,
    session: Option<Session>,
    auth_form: AuthForm,
    passwords: Vec<PasswordEntry>,
    users: Vec<UserAccount>,
    message: Option<TransientMessage>,
    next_message_id: u64,
}

impl<S, T, H> ViewController<S, T, H>
where
    S: TokenStore,
    T: ApiTransport,
    H: UiHost,
{
    pub fn new(store: S, transport: T, host: H) -> Self {
        Self {
            store,
            transport,
            host,
            session: None,
            auth_form: AuthForm::Login,
            passwords: Vec::new(),
            users: Vec::new(),
            message: None,
            next_message_id: 1,
        }
    }

    /// Loads the persisted token without contacting the backend.
    pub fn restore_session(&mut self) -> Result<SessionState, S::Error> {
        let token = non_empty_token(self.store.load_token()?.as_deref());
        self.session = token.map(Session::from_token);
        let state = self.state();
        info!(state = state.as_str(), "session restored from storage");
        Ok(state)
    }

    /// Startup: restore the session, then fetch the lists it can see.
    pub async fn boot(&mut self) -> Result<SessionState, S::Error> {
        let state = self.restore_session()?;
        if state.is_logged_in() {
            self.refresh_lists().await;
        }
        Ok(state)
    }

    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<ActionOutcome, S::Error> {
        let credentials = match Credentials::new(username, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                self.post_error(error.to_string());
                return Ok(ActionOutcome::Failed);
            }
        };

        let response = self
            .request(&ApiIntent::Login(credentials))
            .await
            .and_then(decode_json_response::<LoginResponse>);
        let token = match response {
            Ok(response) if !response.access_token.trim().is_empty() => {
                response.access_token.trim().to_string()
            }
            Ok(_) => {
                self.report_failure(
                    ActionKind::Login,
                    &ApiError::Decode {
                        status: 200,
                        message: "login response carried an empty access_token".to_string(),
                    },
                );
                return Ok(ActionOutcome::Failed);
            }
            Err(error) => {
                self.report_failure(ActionKind::Login, &error);
                return Ok(ActionOutcome::Failed);
            }
        };

        self.store.save_token(&token)?;
        self.session = Some(Session::from_token(token));
        self.passwords.clear();
        self.users.clear();
        self.auth_form = AuthForm::Login;
        info!(state = self.state().as_str(), "logged in");

        self.refresh_lists().await;
        Ok(ActionOutcome::Completed)
    }

    pub async fn register(&mut self, username: &str, password: &str) -> ActionOutcome {
        let credentials = match Credentials::new(username, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                self.post_error(error.to_string());
                return ActionOutcome::Failed;
            }
        };

        match self.request(&ApiIntent::Register(credentials)).await {
            Ok(_) => {
                info!("registration accepted");
                self.post_success(MSG_REGISTERED);
                self.auth_form = AuthForm::Login;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::Register, &error);
                ActionOutcome::Failed
            }
        }
    }

    /// Clears the persisted token and the in-memory session. The in-memory
    /// state is torn down even when the store fails to clear.
    pub fn logout(&mut self) -> Result<(), S::Error> {
        let cleared = self.store.clear_token();
        self.session = None;
        self.passwords.clear();
        self.users.clear();
        self.auth_form = AuthForm::Login;
        info!("logged out");
        cleared
    }

    pub fn show_login(&mut self) {
        self.auth_form = AuthForm::Login;
    }

    pub fn show_register(&mut self) {
        self.auth_form = AuthForm::Register;
    }

    pub async fn refresh_lists(&mut self) {
        self.load_passwords().await;
        if self.state().is_admin() {
            self.load_users().await;
        }
    }

    pub async fn load_passwords(&mut self) -> ActionOutcome {
        if self.session.is_none() {
            return ActionOutcome::Skipped;
        }
        let response = self
            .request(&ApiIntent::ListPasswords)
            .await
            .and_then(decode_json_response::<Vec<PasswordEntry>>);
        match response {
            Ok(entries) => {
                debug!(count = entries.len(), "password list loaded");
                self.passwords = entries;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::ListPasswords, &error);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn add_password(
        &mut self,
        service: &str,
        username: &str,
        password: &str,
    ) -> ActionOutcome {
        if self.session.is_none() {
            return ActionOutcome::Skipped;
        }
        let entry = match NewPasswordEntry::new(service, username, password) {
            Ok(entry) => entry,
            Err(error) => {
                self.post_error(error.to_string());
                return ActionOutcome::Failed;
            }
        };

        match self.request(&ApiIntent::AddPassword(entry)).await {
            Ok(_) => {
                self.post_success(MSG_PASSWORD_SAVED);
                self.load_passwords().await;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::AddPassword, &error);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn delete_password(&mut self, id: EntryId) -> ActionOutcome {
        if self.session.is_none() {
            return ActionOutcome::Skipped;
        }
        if !self.host.confirm(PROMPT_DELETE_PASSWORD) {
            return ActionOutcome::Declined;
        }

        match self.request(&ApiIntent::DeletePassword { id }).await {
            Ok(_) => {
                self.post_success(MSG_PASSWORD_DELETED);
                self.load_passwords().await;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::DeletePassword, &error);
                ActionOutcome::Failed
            }
        }
    }

    /// Copies the password of a rendered entry to the host clipboard.
    pub async fn copy_password(&mut self, id: EntryId) -> ActionOutcome {
        let Some(password) = self
            .passwords
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.password.clone())
        else {
            return ActionOutcome::Skipped;
        };

        match self.host.write_clipboard(&password).await {
            Ok(()) => {
                self.post_success(MSG_PASSWORD_COPIED);
                ActionOutcome::Completed
            }
            Err(error) => {
                warn!(error = %error, "clipboard write failed");
                self.post_error(MSG_COPY_FAILED.to_string());
                ActionOutcome::Failed
            }
        }
    }

    pub async fn load_users(&mut self) -> ActionOutcome {
        if !self.state().is_admin() {
            return ActionOutcome::Skipped;
        }
        let response = self
            .request(&ApiIntent::ListUsers)
            .await
            .and_then(decode_json_response::<Vec<UserAccount>>);
        match response {
            Ok(users) => {
                debug!(count = users.len(), "user list loaded");
                self.users = users;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::ListUsers, &error);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn delete_user(&mut self, id: EntryId) -> ActionOutcome {
        if !self.state().is_admin() {
            return ActionOutcome::Skipped;
        }
        if !self.host.confirm(PROMPT_DELETE_USER) {
            return ActionOutcome::Declined;
        }

        match self.request(&ApiIntent::DeleteUser { id }).await {
            Ok(_) => {
                self.post_success(MSG_USER_DELETED);
                self.load_users().await;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.report_failure(ActionKind::DeleteUser, &error);
                ActionOutcome::Failed
            }
        }
    }

    /// Clears the current message if it is still the one identified by `id`.
    pub fn expire_message(&mut self, id: u64) -> bool {
        if self.message.as_ref().is_some_and(|message| message.id == id) {
            self.message = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::of(self.session.as_ref())
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        let state = self.state();
        ViewState {
            auth_visible: !state.is_logged_in(),
            app_visible: state.is_logged_in(),
            admin_visible: state.is_admin(),
            auth_form: self.auth_form,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn passwords(&self) -> &[PasswordEntry] {
        &self.passwords
    }

    /// Users are only exposed while the session carries the admin claim.
    #[must_use]
    pub fn users(&self) -> &[UserAccount] {
        if self.state().is_admin() {
            &self.users
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub fn passwords_html(&self) -> String {
        render_password_list(&self.passwords)
    }

    #[must_use]
    pub fn users_html(&self) -> String {
        render_user_list(
            self.users(),
            self.session.as_ref().and_then(Session::subject),
        )
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    async fn request(&self, intent: &ApiIntent) -> Result<ApiResponse, ApiError> {
        let plan = plan_request(intent);
        let bearer_token = match plan.auth {
            AuthRequirement::None => None,
            AuthRequirement::BearerToken => self.session.as_ref().map(Session::token),
        };
        debug!(
            action = intent.action().as_str(),
            method = plan.method.as_str(),
            path = %plan.path,
            "sending request"
        );
        let response = self.transport.execute(&plan, bearer_token).await?;
        ensure_success(response)
    }

    fn report_failure(&mut self, action: ActionKind, error: &ApiError) {
        warn!(
            action = action.as_str(),
            status = error.status(),
            error = %error,
            "request failed"
        );
        self.post_error(failure_message(action, error));
    }

    fn post_success(&mut self, text: &str) {
        self.post_message(text.to_string(), MessageTone::Success);
    }

    fn post_error(&mut self, text: String) {
        self.post_message(text, MessageTone::Error);
    }

    fn post_message(&mut self, text: String, tone: MessageTone) {
        let id = self.next_message_id;
        self.next_message_id = self.next_message_id.wrapping_add(1);
        self.message = Some(TransientMessage { id, text, tone });
    }
}
