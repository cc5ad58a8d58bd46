#![allow(dead_code)]

// tests/common/mod.rs
use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use actix_web::Error;
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;
use serde_json::{json, Value};

// Logging is auto-installed for every integration test binary
#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Security config shared by most integration tests.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}

/// Fresh in-memory state with migrations applied.
pub async fn test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbProfile::Test)
        .with_security(test_security())
        .build()
        .await
}

/// Register a user through the HTTP surface and assert success.
pub async fn register_user<S>(app: &S, username: &str, email: &str, password: &str, role: &str)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password,
            "role": role,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");
}

/// Log in and return (access_token, refresh_token).
pub async fn login_user<S>(app: &S, username: &str, password: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/token")
        .set_json(json!({
            "username": username,
            "password": password,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: Value = test::read_body_json(resp).await;
    let access = body["access_token"].as_str().expect("access_token").to_string();
    let refresh = body["refresh_token"].as_str().expect("refresh_token").to_string();
    (access, refresh)
}

/// Validate that an error response follows the ProblemDetails structure and
/// carries the expected status and code. Returns the parsed body for any
/// further assertions.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    // Extract headers before consuming the response
    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8")
        .to_string();
    assert!(!trace_id.is_empty());

    // Content-Type may include parameters (e.g., charset)
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], expected_code);
    assert_eq!(body["status"], expected_status);
    assert!(body.get("type").is_some());
    assert!(body.get("title").is_some());
    assert!(body.get("detail").is_some());
    assert_eq!(
        body["trace_id"].as_str().expect("trace_id should be a string"),
        trace_id,
        "trace_id in body should match x-trace-id header"
    );

    body
}
