use super::*;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use serde_json::json;
use session::controller::INIT_FAILED;
use session::{Credential, MemoryTokenStore, SessionPhase, User};

// =============================================================================
// config + args
// =============================================================================

#[test]
fn api_url_joins_without_double_slash() {
    assert_eq!(api_url("http://localhost:5000/api/", "/courses"), "http://localhost:5000/api/courses");
    assert_eq!(api_url("http://localhost:5000/api", "courses/1"), "http://localhost:5000/api/courses/1");
}

#[test]
fn resolve_state_dir_prefers_flag() {
    let dir = resolve_state_dir(Some(PathBuf::from("/tmp/ajarin")), Some(OsString::from("/home/budi")));
    assert_eq!(dir, PathBuf::from("/tmp/ajarin"));
}

#[test]
fn resolve_state_dir_falls_back_to_home_then_cwd() {
    assert_eq!(
        resolve_state_dir(None, Some(OsString::from("/home/budi"))),
        PathBuf::from("/home/budi/.ajarin")
    );
    assert_eq!(resolve_state_dir(None, None), PathBuf::from(".ajarin"));
}

#[test]
fn parse_password_line_strips_line_ending_only() {
    assert_eq!(parse_password_line(" rahasia \r\n").unwrap(), " rahasia ");
    assert!(matches!(parse_password_line("\n"), Err(CliError::MissingInput("password"))));
}

#[test]
fn flags_override_environment_config() {
    let cli = Cli::try_parse_from([
        "ajarin",
        "--base-url",
        "https://api.ajarin.id",
        "--timeout-secs",
        "5",
        "--stale-validation",
        "discard",
        "status",
    ])
    .unwrap();
    let config = build_config(&cli, SessionConfig::default()).unwrap();
    assert_eq!(config.api_base_url, "https://api.ajarin.id");
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.stale_results, session::StaleResultPolicy::Discard);
}

#[test]
fn invalid_stale_policy_is_config_error() {
    let cli = Cli::try_parse_from(["ajarin", "--stale-validation", "sometimes", "status"]).unwrap();
    assert!(matches!(
        build_config(&cli, SessionConfig::default()),
        Err(CliError::Config(_))
    ));
}

#[test]
fn api_get_parses_path() {
    let cli = Cli::try_parse_from(["ajarin", "api", "get", "/courses"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Api(ApiCommand { command: ApiSubcommand::Get { ref path } }) if path == "/courses"
    ));
}

// =============================================================================
// status
// =============================================================================

fn settled(credential: Option<Credential>, error: Option<&str>) -> Session {
    Session {
        phase: if credential.is_some() { SessionPhase::Authenticated } else { SessionPhase::Anonymous },
        credential,
        is_loading: false,
        is_initialized: true,
        error: error.map(str::to_owned),
    }
}

#[test]
fn status_fails_when_initialization_recorded_an_error() {
    let state = settled(None, Some(INIT_FAILED));
    let err = status_outcome(&state).unwrap_err();
    assert!(matches!(err, CliError::InitFailed(ref msg) if msg == INIT_FAILED));
}

#[test]
fn status_reports_user_or_anonymous_without_error() {
    assert!(status_outcome(&settled(None, None)).unwrap().is_none());

    let user = User {
        id: "1".to_owned(),
        name: "Budi".to_owned(),
        email: None,
        role: None,
        avatar: None,
    };
    let state = settled(
        Some(Credential {
            user,
            token: "abc".to_owned(),
        }),
        None,
    );
    assert_eq!(status_outcome(&state).unwrap().map(|u| u.name.as_str()), Some("Budi"));
}

// =============================================================================
// api_request
// =============================================================================

async fn courses(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let token = headers.get("authorization").and_then(|v| v.to_str().ok());
    match token {
        Some("Bearer abc") => (StatusCode::OK, Json(json!({ "success": true, "data": [] }))),
        Some("Bearer forbidden") => (
            StatusCode::FORBIDDEN,
            Json(json!({ "success": false, "message": "Tutors only" })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Token expired" })),
        ),
    }
}

async fn spawn_backend() -> String {
    let router = Router::new().route("/api/courses", get(courses));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn controller_with_token(base_url: &str, token: &str) -> SessionController<HttpGateway, MemoryTokenStore> {
    let config = SessionConfig {
        api_base_url: base_url.to_owned(),
        ..SessionConfig::default()
    };
    let user = User {
        id: "1".to_owned(),
        name: "Budi".to_owned(),
        email: None,
        role: None,
        avatar: None,
    };
    SessionController::new(
        HttpGateway::new(&config).unwrap(),
        MemoryTokenStore::with_credential(token, user),
    )
}

#[tokio::test]
async fn api_request_signs_with_stored_token() {
    let base_url = spawn_backend().await;
    let controller = controller_with_token(&base_url, "abc");
    let client = reqwest::Client::new();

    let value = api_request(&controller, &client, &base_url, reqwest::Method::GET, "/courses", None)
        .await
        .unwrap();
    assert_eq!(value["success"], true);
}

#[tokio::test]
async fn api_request_401_clears_persisted_session() {
    let base_url = spawn_backend().await;
    let controller = controller_with_token(&base_url, "stale");
    let client = reqwest::Client::new();

    let err = api_request(&controller, &client, &base_url, reqwest::Method::GET, "/courses", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::SessionExpired));
    assert_eq!(controller.store().get_token(), None);
    assert!(controller.state().is_initialized);
}

#[tokio::test]
async fn api_request_surfaces_server_message() {
    let base_url = spawn_backend().await;
    let controller = controller_with_token(&base_url, "forbidden");
    let client = reqwest::Client::new();

    let err = api_request(&controller, &client, &base_url, reqwest::Method::GET, "courses", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::ServerError { status: 403, ref message } if message == "Tutors only"
    ));
    assert_eq!(controller.store().get_token().as_deref(), Some("forbidden"));
}

#[tokio::test]
async fn api_request_without_session_is_not_signed_in() {
    let controller = SessionController::new(
        HttpGateway::new(&SessionConfig::default()).unwrap(),
        MemoryTokenStore::new(),
    );
    let client = reqwest::Client::new();
    let err = api_request(&controller, &client, "http://127.0.0.1:9", reqwest::Method::GET, "/x", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::NotSignedIn));
}
