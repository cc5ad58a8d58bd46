//! Error codes for the DevLink backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the DevLink backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required, or a well-formed token that is revoked
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token is malformed or its signature does not verify
    InvalidToken,
    /// Token signature verifies but the expiry has passed
    ExpiredToken,
    /// Username/email or password did not match any account
    InvalidCredentials,
    /// Current password given for a reset does not match the stored hash
    IncorrectPassword,
    /// Access denied
    Forbidden,
    /// Token subject no longer maps to a user record
    ForbiddenUserNotFound,

    // Request Validation
    /// Role is not one of the recognized values
    InvalidRole,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Post not found
    PostNotFound,

    // Business Logic Conflicts
    /// Username or email already registered
    DuplicateIdentity,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Unique constraint violation not attributable to a known identity column
    UniqueViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            // Request Validation
            Self::InvalidRole => "INVALID_ROLE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",

            // Business Logic Conflicts
            Self::DuplicateIdentity => "DUPLICATE_IDENTITY",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
