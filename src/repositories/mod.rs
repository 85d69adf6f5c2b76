//! Repository layer for database operations.
//!
//! This module keeps MongoDB access out of the service layer so business rules
//! can be read without driver details.

pub mod bootcamp_repository;

pub use bootcamp_repository::{BootcampRepository, PageSource};
