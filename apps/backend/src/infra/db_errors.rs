//! SeaORM -> DomainError translation helpers.
//!
//! Adapters surface raw `sea_orm::DbErr`; this module converts those into
//! `crate::errors::domain::DomainError`, and higher layers map `DomainError`
//! to `AppError` via `From`. Uniqueness of username/email is enforced by the
//! store's unique indexes, so a racing duplicate registration shows up here
//! as a unique violation rather than as an application-level check.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split_whitespace().next();
    }
    None
}

/// Map a SQLite table.column to a domain-specific conflict.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "users.username" | "users.email" => Some((
            ConflictKind::DuplicateIdentity,
            "Username or email already exists",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflicts.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("users_username_key") || error_msg.contains("users_email_key") {
        return Some((
            ConflictKind::DuplicateIdentity,
            "Username or email already exists",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let sea_orm::DbErr::RecordNotFound(_) = &e {
        return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
    }

    // Unique violations: SQLite spells out table.column, Postgres names the index.
    if error_msg.contains("UNIQUE constraint failed") {
        if let Some((kind, detail)) = extract_sqlite_table_column(&error_msg)
            .and_then(map_sqlite_table_column_to_conflict)
        {
            warn!(trace_id = %trace_id, "unique violation: {detail}");
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(ConflictKind::UniqueViolation, "Unique constraint violation");
    }
    if error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("23505")
    {
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            warn!(trace_id = %trace_id, "unique violation: {detail}");
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(ConflictKind::UniqueViolation, "Unique constraint violation");
    }

    match &e {
        sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
            warn!(trace_id = %trace_id, "database unavailable: {error_msg}");
            DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
        }
        _ => DomainError::infra(InfraErrorKind::Other("Db".into()), format!("db error: {e}")),
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_unique_violation_on_username() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: error returned from database: UNIQUE constraint failed: users.username".to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::DuplicateIdentity, _) => {}
            other => panic!("expected DuplicateIdentity conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_sqlite_unique_violation_on_email() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: error returned from database: UNIQUE constraint failed: users.email"
                .to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::DuplicateIdentity, _) => {}
            other => panic!("expected DuplicateIdentity conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_postgres_unique_violation() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::DuplicateIdentity, _) => {}
            other => panic!("expected DuplicateIdentity conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_record_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("users".to_string());
        match map_db_err(err) {
            DomainError::NotFound(_, _) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unattributed_unique_violation_maps_to_unique_violation() {
        let err = sea_orm::DbErr::Custom(
            "Execution Error: UNIQUE constraint failed: posts.title".to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueViolation, _) => {}
            other => panic!("expected UniqueViolation conflict, got {other:?}"),
        }
    }
}
