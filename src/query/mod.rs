//! Query construction for list and radius endpoints.
//!
//! Everything here is a pure function of the request. List metadata never fails
//! to parse; malformed values fall back to defaults.

pub mod builder;
pub mod filter;
pub mod geo;

pub use builder::{ListQuery, PageRef, Pagination};
pub use geo::{parse_distance, within_radius, GeoPoint};
