//! Rate limiting middleware for the public API.
//!
//! Every client IP gets a budget of requests that refills over time.

use actix_governor::governor::clock::QuantaInstant;
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};

/// Per-IP limiter configuration used on the versioned API scope.
pub type ApiRateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Seconds needed to replenish one request (100 requests per 10 minutes).
pub const API_SECONDS_PER_REQUEST: u64 = 6;

/// Requests a client may make in a burst before throttling starts.
pub const API_BURST_SIZE: u32 = 100;

/// Create rate limiter configuration for the versioned API scope.
///
/// Returns `None` if the limits are zero.
///
/// Usage:
/// ```ignore
/// let config = create_api_rate_limiter_config().unwrap();
/// web::scope("/api/v1").wrap(Governor::new(&config))
/// ```
pub fn create_api_rate_limiter_config() -> Option<ApiRateLimit> {
    GovernorConfigBuilder::default()
        .seconds_per_request(API_SECONDS_PER_REQUEST)
        .burst_size(API_BURST_SIZE)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_rate_limiter_config_is_valid() {
        assert!(create_api_rate_limiter_config().is_some());
    }
}
