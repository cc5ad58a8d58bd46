mod common;
mod support;

use actix_web::test;
use serde_json::json;

use common::{assert_problem_details, login_user, register_user, test_state};
use support::create_test_app;

/// Full session lifecycle: register, login, refresh, logout.
#[actix_web::test]
async fn test_register_login_refresh_logout() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    register_user(&app, "ada", "ada@example.com", "hunter2!", "developer").await;
    let (access, refresh) = login_user(&app, "ada", "hunter2!").await;

    // iat has one-second resolution; step past it so the refreshed access
    // token cannot be byte-identical to the one it supersedes.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    // Refresh: old access token gets revoked, a new one comes back.
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh-token")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let new_access = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["username"], "ada");
    assert_eq!(body["role"], "developer");
    assert_ne!(new_access, access);

    // The pre-refresh access token is now revoked.
    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({ "current_password": "hunter2!", "new_password": "other" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED").await;

    // Logout revokes both the bearer access token and the refresh token.
    let req = test::TestRequest::get()
        .uri(&format!("/api/auth/logout?refresh_token={refresh}"))
        .insert_header(("Authorization", format!("Bearer {new_access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");

    // Refresh token no longer usable: login again for a live access token,
    // then present the revoked refresh token.
    let (access2, _refresh2) = login_user(&app, "ada", "hunter2!").await;
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh-token")
        .insert_header(("Authorization", format!("Bearer {access2}")))
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED").await;

    // Revoked access token is also rejected on authenticated routes.
    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .insert_header(("Authorization", format!("Bearer {new_access}")))
        .set_json(json!({ "current_password": "hunter2!", "new_password": "other" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED").await;

    Ok(())
}

/// Logging out twice is harmless; revocation is idempotent.
#[actix_web::test]
async fn test_logout_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    register_user(&app, "bob", "bob@example.com", "pw123456", "company").await;
    let (access, refresh) = login_user(&app, "bob", "pw123456").await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri(&format!("/api/auth/logout?refresh_token={refresh}"))
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    Ok(())
}

/// A missing bearer token yields the dedicated missing-bearer code.
#[actix_web::test]
async fn test_missing_bearer_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "current_password": "a", "new_password": "b" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;

    Ok(())
}

/// A syntactically invalid token is rejected before any DB work.
#[actix_web::test]
async fn test_garbage_token_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .set_json(json!({ "current_password": "a", "new_password": "b" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "INVALID_TOKEN").await;

    Ok(())
}
