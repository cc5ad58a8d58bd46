mod common;
mod support;

use actix_web::test;
use serde_json::json;

use common::{assert_problem_details, login_user, register_user, test_state};
use support::create_test_app;

#[actix_web::test]
async fn test_post_create_list_get() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    register_user(&app, "zoe", "zoe@example.com", "pw123456", "company").await;
    let (access, _refresh) = login_user(&app, "zoe", "pw123456").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({
            "title": "We are hiring",
            "content": "Looking for a Rust engineer.",
            "image_urls": ["https://cdn.example.com/a.png"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let created: serde_json::Value = test::read_body_json(resp).await;
    let post_id = created["id"].as_i64().expect("post id");
    assert_eq!(created["title"], "We are hiring");
    assert_eq!(created["image_urls"][0], "https://cdn.example.com/a.png");

    // Listing is public.
    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"], post_id);
    assert_eq!(fetched["content"], "Looking for a Rust engineer.");

    Ok(())
}

#[actix_web::test]
async fn test_post_create_requires_auth() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "t", "content": "c", "image_urls": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;

    Ok(())
}

#[actix_web::test]
async fn test_post_missing_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/posts/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "POST_NOT_FOUND").await;

    Ok(())
}

#[actix_web::test]
async fn test_post_delete_author_only() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    register_user(&app, "ana", "ana@example.com", "pw123456", "company").await;
    register_user(&app, "ben", "ben@example.com", "pw123456", "developer").await;
    let (ana_token, _) = login_user(&app, "ana", "pw123456").await;
    let (ben_token, _) = login_user(&app, "ben", "pw123456").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {ana_token}")))
        .set_json(json!({ "title": "Ana's post", "content": "…", "image_urls": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let post_id = created["id"].as_i64().unwrap();

    // Someone else's token is rejected.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {ben_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;

    // The author can delete, and the post is gone afterwards.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {ana_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "POST_NOT_FOUND").await;

    Ok(())
}
