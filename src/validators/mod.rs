//! Input validation helpers.

pub mod bootcamp;
pub mod common;

pub use bootcamp::*;
pub use common::*;
