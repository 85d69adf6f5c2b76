//! HTTP request handlers organized by domain.

pub mod bootcamp_handler;
pub mod health_handler;
pub mod photo_handler;

pub use bootcamp_handler::*;
pub use health_handler::*;
pub use photo_handler::*;
