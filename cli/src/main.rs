use std::ffi::OsString;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use session::config::parse_stale_policy;
use session::{
    AuthGateway, ConfigError, ControllerOptions, Credentials, FileTokenStore, GatewayError, HttpGateway,
    RegisterRequest, Session, SessionConfig, SessionController, SessionError, TokenStore, User,
};
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

type Controller = SessionController<HttpGateway, FileTokenStore>;

/// Directory under `$HOME` holding the persisted credential.
const STATE_DIR_NAME: &str = ".ajarin";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("could not restore session: {0}")]
    InitFailed(String),
    #[error("not signed in; run `ajarin login` first")]
    NotSignedIn,
    #[error("session expired; run `ajarin login` again")]
    SessionExpired,
    #[error("could not refresh profile; try `ajarin status`")]
    RefreshFailed,
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("missing expected input `{0}`")]
    MissingInput(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ajarin", about = "Ajarin.id session CLI")]
struct Cli {
    #[arg(long, env = "AJARIN_API_BASE_URL")]
    base_url: Option<String>,

    /// Where the token and cached profile are kept.
    #[arg(long, env = "AJARIN_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[arg(long, env = "AJARIN_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// `apply` or `discard` for validation results that finish after a logout.
    #[arg(long, env = "AJARIN_STALE_VALIDATION")]
    stale_validation: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the credential.
    Login(LoginArgs),
    /// Create an account and sign in with it.
    Register(RegisterArgs),
    /// Sign out and remove the persisted credential.
    Logout,
    /// Restore the persisted credential and confirm it with the backend.
    Status,
    /// Re-fetch the signed-in user's profile.
    Refresh,
    /// Print the `Authorization` header for the current session.
    Token,
    /// Authenticated requests against the backend API.
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    /// Read from stdin when omitted.
    #[arg(long, env = "AJARIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// Read from stdin when omitted.
    #[arg(long, env = "AJARIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long)]
    role: Option<String>,
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    Get { path: String },
    Post {
        path: String,
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_logging();

    let cli = Cli::parse();
    let config = build_config(&cli, SessionConfig::from_env()?)?;
    let state_dir = resolve_state_dir(cli.state_dir.clone(), std::env::var_os("HOME"));
    tracing::debug!(base_url = %config.api_base_url, state_dir = %state_dir.display(), "starting");

    let controller = build_controller(&config, state_dir)?;
    match cli.command {
        Command::Login(args) => run_login(&controller, args).await,
        Command::Register(args) => run_register(&controller, args).await,
        Command::Logout => {
            controller.logout().await;
            println!("logged out");
            Ok(())
        }
        Command::Status => run_status(&controller).await,
        Command::Refresh => run_refresh(&controller).await,
        Command::Token => {
            let header = controller.authorization_header().ok_or(CliError::NotSignedIn)?;
            println!("{header}");
            Ok(())
        }
        Command::Api(api) => run_api(&controller, &config, api).await,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Layer command-line flags over the environment-derived config.
fn build_config(cli: &Cli, mut config: SessionConfig) -> Result<SessionConfig, CliError> {
    if let Some(base_url) = &cli.base_url {
        config.api_base_url.clone_from(base_url);
    }
    if let Some(timeout) = cli.timeout_secs {
        config.request_timeout_secs = timeout;
    }
    if let Some(raw) = cli.stale_validation.as_deref() {
        config.stale_results = parse_stale_policy(Some(raw))?;
    }
    Ok(config)
}

fn resolve_state_dir(flag: Option<PathBuf>, home: Option<OsString>) -> PathBuf {
    flag.unwrap_or_else(|| match home {
        Some(home) => PathBuf::from(home).join(STATE_DIR_NAME),
        None => PathBuf::from(STATE_DIR_NAME),
    })
}

fn build_controller(config: &SessionConfig, state_dir: PathBuf) -> Result<Controller, CliError> {
    let options = ControllerOptions {
        stale_results: config.stale_results,
        ..ControllerOptions::default()
    };
    Ok(SessionController::with_options(
        HttpGateway::new(config)?,
        FileTokenStore::new(state_dir),
        options,
    ))
}

fn password_or_stdin(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("password: ");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    parse_password_line(&line)
}

fn parse_password_line(line: &str) -> Result<String, CliError> {
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::MissingInput("password"));
    }
    Ok(password.to_owned())
}

async fn run_login(controller: &Controller, args: LoginArgs) -> Result<(), CliError> {
    let password = password_or_stdin(args.password)?;
    let user = controller.login(&Credentials::new(args.email, password)).await?;
    println!("signed in as {} <{}>", user.name, user.email.as_deref().unwrap_or("-"));
    Ok(())
}

async fn run_register(controller: &Controller, args: RegisterArgs) -> Result<(), CliError> {
    let request = RegisterRequest {
        name: args.name,
        email: args.email,
        password: password_or_stdin(args.password)?,
        role: args.role,
    };
    let user = controller.register(&request).await?;
    println!("registered and signed in as {}", user.name);
    Ok(())
}

async fn run_status(controller: &Controller) -> Result<(), CliError> {
    controller.initialize_auth().await;
    let state = controller.state();
    match status_outcome(&state)? {
        Some(user) => print_json(&serde_json::to_value(user)?),
        None => {
            println!("not signed in");
            Ok(())
        }
    }
}

/// Signed-in user after startup validation, or the failure it recorded.
fn status_outcome(state: &Session) -> Result<Option<&User>, CliError> {
    if let Some(error) = &state.error {
        return Err(CliError::InitFailed(error.clone()));
    }
    Ok(state.user())
}

async fn run_refresh(controller: &Controller) -> Result<(), CliError> {
    if controller.get_token().is_none() {
        return Err(CliError::NotSignedIn);
    }
    if !controller.refresh_user().await {
        return Err(CliError::RefreshFailed);
    }
    // The refreshed profile is persisted even without an in-memory session.
    let user = controller.store().get_user_data().ok_or(CliError::NotSignedIn)?;
    print_json(&serde_json::to_value(user)?)
}

async fn run_api(controller: &Controller, config: &SessionConfig, api: ApiCommand) -> Result<(), CliError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    let (method, path, body) = match api.command {
        ApiSubcommand::Get { path } => (reqwest::Method::GET, path, None),
        ApiSubcommand::Post { path, data } => (reqwest::Method::POST, path, Some(serde_json::from_str(&data)?)),
    };
    let value = api_request(controller, &client, &config.api_base_url, method, &path, body).await?;
    print_json(&value)
}

/// Signed request against the backend. A 401 ends the local session.
async fn api_request<G, S>(
    controller: &SessionController<G, S>,
    client: &reqwest::Client,
    base_url: &str,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError>
where
    G: AuthGateway,
    S: TokenStore,
{
    let header = controller.authorization_header().ok_or(CliError::NotSignedIn)?;
    let url = api_url(base_url, path);

    let request = client.request(method, &url).header(AUTHORIZATION, header);
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status().as_u16();
    let value = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Null);
    tracing::debug!(status, %url, "api response");

    if status == 401 {
        controller.handle_unauthorized();
        return Err(CliError::SessionExpired);
    }
    if !(200..300).contains(&status) {
        return Err(CliError::ServerError {
            status,
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| value.to_string(), str::to_owned),
        });
    }
    Ok(value)
}

fn api_url(base_url: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
