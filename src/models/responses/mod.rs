//! Response models for API endpoints.

pub mod api;
pub mod bootcamp;
pub mod pagination;

pub use api::*;
pub use bootcamp::*;
pub use pagination::*;
