//! Small helpers shared across services.

pub mod document_json;
pub mod slug;

pub use document_json::document_to_json;
pub use slug::slugify;
