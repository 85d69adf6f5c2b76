//! Data models organized by type.

pub mod bootcamp;
pub mod claims;
pub mod requests;
pub mod responses;

pub use bootcamp::*;
pub use claims::*;
pub use requests::*;
pub use responses::*;
