//! List response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::BootcampResponse;
use crate::query::Pagination;

/// Paginated list response; records are projected by the `select` parameter
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Number of records on this page
    pub count: usize,
    /// Neighbouring page descriptors
    pub pagination: Pagination,
    /// Records on this page
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
}

impl PaginatedResponse {
    pub fn new(data: Vec<serde_json::Value>, pagination: Pagination) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

/// Unpaginated list response (radius search)
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<BootcampResponse>,
}

impl ListResponse {
    pub fn new(data: Vec<BootcampResponse>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRef;
    use serde_json::json;

    #[test]
    fn test_paginated_envelope() {
        let response = PaginatedResponse::new(
            vec![json!({ "name": "a" }), json!({ "name": "b" })],
            Pagination {
                next: Some(PageRef { page: 2, limit: 2 }),
                prev: None,
            },
        );

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "count": 2,
                "pagination": { "next": { "page": 2, "limit": 2 } },
                "data": [{ "name": "a" }, { "name": "b" }]
            })
        );
    }
}
