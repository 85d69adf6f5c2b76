//! MongoDB collection names.

pub const COLLECTION_BOOTCAMPS: &str = "bootcamps";
pub const COLLECTION_COURSES: &str = "courses";
