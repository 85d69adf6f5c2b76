//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Not authorized to access this route";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";

// Authorization errors
pub const ERR_NOT_BOOTCAMP_OWNER: &str = "You are not authorized to modify this bootcamp";

// Bootcamp errors
pub const ERR_BOOTCAMP_NOT_FOUND: &str = "Bootcamp not found with id of";
pub const ERR_FAILED_FETCH_BOOTCAMP: &str = "Failed to fetch updated bootcamp";
pub const ERR_DUPLICATE_FIELD: &str = "Duplicate field value entered";

// Radius search errors
pub const ERR_INVALID_DISTANCE: &str = "Distance must be a non-negative number of kilometers";
pub const ERR_LOCATION_NOT_FOUND: &str = "Could not locate the given address";
pub const ERR_GEOCODER_FAILED: &str = "Geocoding request failed";

// File errors
pub const ERR_NO_PHOTO_FILE: &str = "Please upload a file";
pub const ERR_INVALID_FILE_TYPE: &str = "Please upload an image file";
pub const ERR_FAILED_PROCESS_UPLOAD: &str = "Failed to process upload";
pub const ERR_FAILED_READ_FILE: &str = "Failed to read file data";
pub const ERR_FAILED_SAVE_FILE: &str = "Problem with file upload";

// Generic errors
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
pub const ERR_SERVER_ERROR: &str = "Server Error";
