//! Type-safe error codes for API responses.
//!
//! Single source of truth for error codes used across the application. Each
//! error code carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid JSON format in request body
    InvalidJson,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// JSON serialization failed server-side
    SerdeJsonError,

    /// I/O error
    IoError,

    // Database errors (2000-2999)
    /// Database query returned no results
    DatabaseNotFound,

    /// Database connection could not be acquired
    DatabaseUnavailable,

    /// Database connection or query error
    DatabaseError,
}

impl ErrorCode {
    /// String identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::DatabaseNotFound => "DATABASE_NOT_FOUND",
            ErrorCode::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidJson => 1002,
            ErrorCode::JsonExtraction => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Conflict => 1005,
            ErrorCode::UnprocessableEntity => 1006,
            ErrorCode::InternalError => 1500,
            ErrorCode::ServiceUnavailable => 1503,
            ErrorCode::SerdeJsonError => 1504,
            ErrorCode::IoError => 1505,
            ErrorCode::DatabaseNotFound => 2001,
            ErrorCode::DatabaseUnavailable => 2002,
            ErrorCode::DatabaseError => 2003,
        }
    }

    /// Default human-readable message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => super::messages::VALIDATION_FAILED,
            ErrorCode::InvalidJson => super::messages::INVALID_JSON,
            ErrorCode::JsonExtraction => super::messages::INVALID_JSON,
            ErrorCode::NotFound => super::messages::NOT_FOUND_RESOURCE,
            ErrorCode::Conflict => super::messages::CONFLICT,
            ErrorCode::UnprocessableEntity => super::messages::UNPROCESSABLE,
            ErrorCode::InternalError => super::messages::INTERNAL_ERROR,
            ErrorCode::ServiceUnavailable => super::messages::SERVICE_UNAVAILABLE,
            ErrorCode::SerdeJsonError => super::messages::INTERNAL_ERROR,
            ErrorCode::IoError => super::messages::INTERNAL_ERROR,
            ErrorCode::DatabaseNotFound => super::messages::NOT_FOUND_RESOURCE,
            ErrorCode::DatabaseUnavailable => super::messages::DB_UNAVAILABLE,
            ErrorCode::DatabaseError => super::messages::DB_ERROR,
        }
    }
}
