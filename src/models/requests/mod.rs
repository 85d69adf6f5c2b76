//! Request models for API endpoints.

pub mod bootcamp;

pub use bootcamp::*;
