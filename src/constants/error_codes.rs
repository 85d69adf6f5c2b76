//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_DISTANCE: &str = "INVALID_DISTANCE";
pub const CODE_DUPLICATE_FIELD: &str = "DUPLICATE_FIELD";
pub const CODE_LOCATION_NOT_FOUND: &str = "LOCATION_NOT_FOUND";

// Authentication errors
pub const CODE_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";

// Authorization errors
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const CODE_ROLE_NOT_ALLOWED: &str = "ROLE_NOT_ALLOWED";

// Bootcamp errors
pub const CODE_BOOTCAMP_NOT_FOUND: &str = "BOOTCAMP_NOT_FOUND";
pub const CODE_BOOTCAMP_LIMIT_REACHED: &str = "BOOTCAMP_LIMIT_REACHED";

// File errors
pub const CODE_INVALID_FILE_TYPE: &str = "INVALID_FILE_TYPE";
pub const CODE_FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
pub const CODE_FILE_UPLOAD_FAILED: &str = "FILE_UPLOAD_FAILED";

// Generic errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
pub const CODE_UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
