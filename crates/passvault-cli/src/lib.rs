use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use passvault_client_core::api::ApiTransport;
use passvault_client_core::auth::TokenStore;
use passvault_client_core::controller::{ActionOutcome, UiHost, ViewController};
use passvault_client_core::messages::TransientMessage;
use passvault_client_core::models::EntryId;
use passvault_client_core::render::{render_password_table, render_user_table};
use passvault_client_core::session::Session;
use tracing::debug;

pub mod config;
pub mod host;
pub mod token_file;
pub mod transport;

use config::CliConfig;
use host::TerminalHost;
use token_file::FileTokenStore;
use transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "passvault")]
#[command(about = "PassVault password manager client")]
pub struct PassVaultCli {
    /// Backend origin, e.g. https://vault.example.com (overrides PASSVAULT_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Token file location (overrides PASSVAULT_TOKEN_PATH)
    #[arg(long, global = true)]
    pub token_path: Option<PathBuf>,
    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login(CredentialArgs),
    /// Create an account (does not sign in)
    Register(CredentialArgs),
    /// Forget the stored session token
    Logout,
    /// Show the signed-in account as claimed by the stored token
    Whoami,
    /// Saved password entries
    #[command(subcommand)]
    Passwords(PasswordsCommand),
    /// User administration (admin accounts only)
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[arg(long, short = 'u')]
    pub username: String,
    /// Read from the first line of stdin when omitted
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PasswordsCommand {
    /// List saved entries
    List {
        /// Print passwords instead of a mask
        #[arg(long)]
        reveal: bool,
    },
    /// Save a new entry
    Add {
        #[arg(long)]
        service: String,
        #[arg(long, default_value = "")]
        username: String,
        /// Read from the first line of stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete an entry
    Delete { id: EntryId },
    /// Print an entry's password to stdout
    Copy { id: EntryId },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List all accounts
    List,
    /// Delete an account
    Delete { id: EntryId },
}

pub async fn run(cli: PassVaultCli) -> Result<()> {
    let config = CliConfig::resolve(cli.base_url.as_deref(), cli.token_path.clone())?;
    debug!(
        base_url = %config.base_url,
        source = config.base_url_source,
        token_path = %config.token_path.display(),
        "resolved cli config"
    );

    let store = FileTokenStore::new(config.token_path.clone());
    let transport =
        ReqwestTransport::new(config.base_url.clone()).context("http client setup failed")?;
    let mut controller = ViewController::new(store, transport, TerminalHost::new(cli.yes));
    controller.restore_session()?;

    match cli.command {
        Commands::Login(args) => {
            let password = password_or_stdin(args.password)?;
            let outcome = controller.login(&args.username, &password).await?;
            report(&controller, outcome)?;
            if let Some(session) = controller.session() {
                write_stdout(&describe_session(session))?;
            }
            Ok(())
        }
        Commands::Register(args) => {
            let password = password_or_stdin(args.password)?;
            let outcome = controller.register(&args.username, &password).await;
            report(&controller, outcome)
        }
        Commands::Logout => {
            controller.logout()?;
            write_stderr("Logged out")
        }
        Commands::Whoami => match controller.session() {
            Some(session) => write_stdout(&describe_session(session)),
            None => write_stdout("Not signed in"),
        },
        Commands::Passwords(command) => {
            require_session(&controller)?;
            run_passwords(&mut controller, command).await
        }
        Commands::Users(command) => {
            require_session(&controller)?;
            if !controller.state().is_admin() {
                bail!("admin role required");
            }
            run_users(&mut controller, command).await
        }
    }
}

async fn run_passwords<S, T, H>(
    controller: &mut ViewController<S, T, H>,
    command: PasswordsCommand,
) -> Result<()>
where
    S: TokenStore,
    T: ApiTransport,
    H: UiHost,
{
    match command {
        PasswordsCommand::List { reveal } => {
            let outcome = controller.load_passwords().await;
            report(controller, outcome)?;
            write_stdout(render_password_table(controller.passwords(), reveal).trim_end())
        }
        PasswordsCommand::Add {
            service,
            username,
            password,
        } => {
            let password = password_or_stdin(password)?;
            let outcome = controller.add_password(&service, &username, &password).await;
            report(controller, outcome)
        }
        PasswordsCommand::Delete { id } => {
            let outcome = controller.delete_password(id).await;
            report(controller, outcome)
        }
        PasswordsCommand::Copy { id } => {
            let outcome = controller.load_passwords().await;
            report(controller, outcome)?;
            match controller.copy_password(id).await {
                ActionOutcome::Skipped => bail!("no saved password with id {id}"),
                outcome => report(controller, outcome),
            }
        }
    }
}

async fn run_users<S, T, H>(
    controller: &mut ViewController<S, T, H>,
    command: UsersCommand,
) -> Result<()>
where
    S: TokenStore,
    T: ApiTransport,
    H: UiHost,
{
    match command {
        UsersCommand::List => {
            let outcome = controller.load_users().await;
            report(controller, outcome)?;
            let subject = controller.session().and_then(Session::subject);
            write_stdout(render_user_table(controller.users(), subject).trim_end())
        }
        UsersCommand::Delete { id } => {
            let outcome = controller.delete_user(id).await;
            report(controller, outcome)
        }
    }
}

fn require_session<S, T, H>(controller: &ViewController<S, T, H>) -> Result<()>
where
    S: TokenStore,
    T: ApiTransport,
    H: UiHost,
{
    if controller.state().is_logged_in() {
        Ok(())
    } else {
        Err(anyhow!("not signed in; run `passvault login` first"))
    }
}

/// Success messages go to stderr so stdout carries only data.
fn report<S, T, H>(controller: &ViewController<S, T, H>, outcome: ActionOutcome) -> Result<()>
where
    S: TokenStore,
    T: ApiTransport,
    H: UiHost,
{
    match outcome_status(outcome, controller.message())? {
        Some(text) => write_stderr(&text),
        None => Ok(()),
    }
}

/// Status line for a finished action, or the error the process exits with.
/// A completed mutation whose follow-up refetch failed leaves an error
/// message behind; that still counts as a failure.
fn outcome_status(
    outcome: ActionOutcome,
    message: Option<&TransientMessage>,
) -> Result<Option<String>> {
    match outcome {
        ActionOutcome::Completed => match message {
            Some(message) if message.is_error() => Err(anyhow!(message.text.clone())),
            Some(message) => Ok(Some(message.text.clone())),
            None => Ok(None),
        },
        ActionOutcome::Failed => Err(anyhow!(
            message.map_or_else(|| "request failed".to_string(), |message| message.text.clone())
        )),
        ActionOutcome::Declined => Ok(Some("Cancelled".to_string())),
        ActionOutcome::Skipped => bail!("nothing to do"),
    }
}

#[must_use]
pub fn describe_session(session: &Session) -> String {
    let Some(claims) = session.claims() else {
        return "Signed in (token carries no readable claims)".to_string();
    };
    let mut lines = vec![format!(
        "Signed in as {}",
        claims.subject().unwrap_or("<unknown>")
    )];
    lines.push(format!(
        "Role: {}",
        if claims.is_admin() { "admin" } else { "user" }
    ));
    if let Some(expires_at) = claims.expires_at() {
        let suffix = if claims.is_expired_at(Utc::now()) {
            " (expired)"
        } else {
            ""
        };
        lines.push(format!("Expires: {}{suffix}", expires_at.to_rfc3339()));
    }
    lines.join("\n")
}

fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_stdout(text: &str) -> Result<()> {
    writeln!(io::stdout().lock(), "{text}").context("stdout write failed")
}

fn write_stderr(text: &str) -> Result<()> {
    writeln!(io::stderr().lock(), "{text}").context("stderr write failed")
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use clap::error::ErrorKind;
    use passvault_client_core::session::Session;

    use passvault_client_core::controller::ActionOutcome;
    use passvault_client_core::messages::{MessageTone, TransientMessage};

    use super::{
        Commands, PassVaultCli, PasswordsCommand, UsersCommand, describe_session, outcome_status,
    };

    fn parse(args: &[&str]) -> PassVaultCli {
        match PassVaultCli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(err) => panic!("expected {args:?} to parse: {err}"),
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        let err = match PassVaultCli::try_parse_from(["passvault"]) {
            Ok(_) => panic!("expected missing subcommand parse error"),
            Err(err) => err,
        };
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        let err = match PassVaultCli::try_parse_from(["passvault", "unknown-subcommand"]) {
            Ok(_) => panic!("expected invalid subcommand parse error"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn login_accepts_global_flags_after_subcommand() {
        let cli = parse(&[
            "passvault",
            "login",
            "--username",
            "alice",
            "--password",
            "pw",
            "--base-url",
            "http://localhost:9000",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.username, "alice");
                assert_eq!(args.password.as_deref(), Some("pw"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn password_subcommands_parse_ids_and_flags() {
        let cli = parse(&["passvault", "-y", "passwords", "delete", "12"]);
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Commands::Passwords(PasswordsCommand::Delete { id: 12 })
        ));

        let cli = parse(&["passvault", "passwords", "list", "--reveal"]);
        assert!(matches!(
            cli.command,
            Commands::Passwords(PasswordsCommand::List { reveal: true })
        ));

        let cli = parse(&["passvault", "passwords", "add", "--service", "mail"]);
        match cli.command {
            Commands::Passwords(PasswordsCommand::Add {
                service,
                username,
                password,
            }) => {
                assert_eq!(service, "mail");
                assert_eq!(username, "");
                assert_eq!(password, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn delete_requires_numeric_id() {
        let err = match PassVaultCli::try_parse_from(["passvault", "users", "delete", "bob"]) {
            Ok(_) => panic!("expected invalid id"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(matches!(
            parse(&["passvault", "users", "list"]).command,
            Commands::Users(UsersCommand::List)
        ));
    }

    fn message(text: &str, tone: MessageTone) -> TransientMessage {
        TransientMessage {
            id: 1,
            text: text.to_string(),
            tone,
        }
    }

    #[test]
    fn completed_action_reports_success_message() {
        let saved = message("Password saved", MessageTone::Success);
        let status = outcome_status(ActionOutcome::Completed, Some(&saved)).expect("status");
        assert_eq!(status.as_deref(), Some("Password saved"));
        let status = outcome_status(ActionOutcome::Declined, None).expect("status");
        assert_eq!(status.as_deref(), Some("Cancelled"));
    }

    #[test]
    fn completed_action_with_failed_refetch_exits_with_error() {
        let refetch_failed = message("Failed to load passwords", MessageTone::Error);
        let err = match outcome_status(ActionOutcome::Completed, Some(&refetch_failed)) {
            Ok(status) => panic!("expected failure, got {status:?}"),
            Err(err) => err,
        };
        assert_eq!(err.to_string(), "Failed to load passwords");
    }

    #[test]
    fn failed_action_without_message_uses_generic_error() {
        let err = match outcome_status(ActionOutcome::Failed, None) {
            Ok(status) => panic!("expected failure, got {status:?}"),
            Err(err) => err,
        };
        assert_eq!(err.to_string(), "request failed");
    }

    #[test]
    fn describe_session_reports_opaque_tokens() {
        let session = Session::from_token("opaque");
        assert_eq!(
            describe_session(&session),
            "Signed in (token carries no readable claims)"
        );
    }
}
