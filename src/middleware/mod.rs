//! Request authentication, authorization helpers and rate limiting.

pub mod auth;
pub mod auth_helpers;
pub mod rate_limiter;

pub use auth::*;
pub use auth_helpers::*;
pub use rate_limiter::*;
