//! Success message constants used throughout the application.

pub const MSG_BOOTCAMP_FOUND: &str = "Bootcamp found";
pub const MSG_BOOTCAMP_CREATED: &str = "Bootcamp created successfully";
pub const MSG_BOOTCAMP_UPDATED: &str = "Bootcamp updated successfully";
pub const MSG_BOOTCAMP_DELETED: &str = "Bootcamp deleted successfully";
pub const MSG_PHOTO_UPLOADED: &str = "Photo uploaded successfully";
