//! Standard error messages for consistent error responses.

pub const VALIDATION_FAILED: &str = "Validation failed for the provided input.";
pub const INVALID_JSON: &str = "Invalid JSON format.";
pub const NOT_FOUND_RESOURCE: &str = "Requested resource was not found.";
pub const CONFLICT: &str = "Request conflicts with the current resource state.";
pub const UNPROCESSABLE: &str = "Request payload could not be processed.";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred.";
pub const SERVICE_UNAVAILABLE: &str = "Service is temporarily unavailable.";
pub const DB_ERROR: &str = "A database error occurred.";
pub const DB_UNAVAILABLE: &str = "Database is temporarily unavailable.";
