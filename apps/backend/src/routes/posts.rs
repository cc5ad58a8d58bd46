use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::posts::Post;
use crate::services::posts as posts_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let created_at = post
            .created_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        let updated_at = post
            .updated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        PostResponse {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            image_urls: post.image_urls,
            created_at,
            updated_at,
        }
    }
}

async fn create_post(
    current_user: CurrentUser,
    req: web::Json<CreatePostRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = posts_service::create_post(
        &app_state.db,
        current_user.id,
        &req.title,
        &req.content,
        req.image_urls.clone(),
    )
    .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

async fn list_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let posts = posts_service::list_posts(&app_state.db).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_post(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = posts_service::get_post(&app_state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

async fn delete_post(
    current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    posts_service::delete_post(&app_state.db, path.into_inner(), current_user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_post))
        .route("", web::get().to(list_posts))
        .route("/{id}", web::get().to(get_post))
        .route("/{id}", web::delete().to(delete_post));
}
