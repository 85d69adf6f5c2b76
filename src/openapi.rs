use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::ErrorResponse;
use crate::models::{
    BootcampResponse, Career, CreateBootcampRequest, HealthResponse, ListResponse, Location,
    PaginatedResponse, Role, UpdateBootcampRequest,
};
use crate::query::{PageRef, Pagination};

/// OpenAPI documentation for the Bootcamps API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevCamper Bootcamps API",
        version = "1.0.0",
        description = "REST API for bootcamp listings with filtering, pagination, radius search and photo upload.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Bootcamps", description = "Bootcamp listing, management, radius search and photos")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::get_bootcamps,
        crate::handlers::get_bootcamp,
        crate::handlers::create_bootcamp,
        crate::handlers::update_bootcamp,
        crate::handlers::delete_bootcamp,
        crate::handlers::get_bootcamps_in_radius,
        crate::handlers::upload_bootcamp_photo
    ),
    components(
        schemas(
            CreateBootcampRequest,
            UpdateBootcampRequest,
            BootcampResponse,
            Career,
            Location,
            Role,
            PageRef,
            Pagination,
            PaginatedResponse,
            ListResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT issued by the accounts service; also accepted from the `token` cookie",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_bootcamp_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/bootcamps"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/bootcamps/radius/{zipcode}/{distance}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/bootcamps/{id}/photo"));
    }
}
