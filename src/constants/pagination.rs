//! Query defaults for list endpoints.

/// Default number of items per page when not specified in the request.
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Default starting page number.
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Field used for ordering when the request carries no `sort` parameter.
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Query keys consumed as list metadata rather than data filters.
pub const RESERVED_QUERY_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];
