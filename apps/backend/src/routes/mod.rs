use actix_web::web;

pub mod auth;
pub mod health;
pub mod posts;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// Production (`main.rs`) wires the same scopes behind the middleware stack;
/// tests register the identical paths so endpoint behavior can be exercised
/// directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/posts").configure(posts::configure_routes));
}
