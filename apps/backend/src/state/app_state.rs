use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state containing shared resources.
///
/// Built once at startup by `infra::state::StateBuilder` and injected into
/// handlers via `web::Data`; nothing in the request path reaches for ambient
/// globals.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { db, security }
    }
}
