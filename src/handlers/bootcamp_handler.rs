//! Bootcamp handlers for listing, CRUD and radius search.

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use log::{debug, info};
use serde_json::json;
use validator::Validate;

use crate::constants::{
    MSG_BOOTCAMP_CREATED, MSG_BOOTCAMP_DELETED, MSG_BOOTCAMP_FOUND, MSG_BOOTCAMP_UPDATED,
};
use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::{
    ApiResponse, BootcampResponse, CreateBootcampRequest, ListResponse, PaginatedResponse,
    UpdateBootcampRequest,
};
use crate::services::BootcampService;
use crate::validators::validation_errors_to_api_error;

/// List bootcamps with filtering, field selection, sorting and pagination
///
/// Any query key other than `select`, `sort`, `page` and `limit` filters on the
/// field of that name. Comparisons use bracket keys such as `averageCost[lte]=10000`
/// or `careers[in]=Business,UI/UX`.
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps",
    tag = "Bootcamps",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma-separated sort fields, '-' prefix for descending (default: -createdAt)"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 25)")
    ),
    responses(
        (status = 200, description = "Page of bootcamps", body = PaginatedResponse),
        (status = 500, description = "Query failed", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bootcamps(
    bootcamp_service: web::Data<BootcampService>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError> {
    let (data, pagination) = bootcamp_service.list(&query).await?;
    debug!("Returning {} bootcamps", data.len());
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(data, pagination)))
}

/// Get a single bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Bootcamp found", body = BootcampResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bootcamp(
    bootcamp_service: web::Data<BootcampService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let bootcamp = bootcamp_service.get(&id).await?;
    let response: BootcampResponse = bootcamp.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_BOOTCAMP_FOUND, response)))
}

/// Create a bootcamp
///
/// Publishers may own one bootcamp; admins are not limited.
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps",
    tag = "Bootcamps",
    request_body = CreateBootcampRequest,
    responses(
        (status = 201, description = "Bootcamp created", body = BootcampResponse),
        (status = 400, description = "Validation error or duplicate name", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role not allowed", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_bootcamp(
    bootcamp_service: web::Data<BootcampService>,
    AuthUser(claims): AuthUser,
    body: web::Json<CreateBootcampRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    req.validate().map_err(validation_errors_to_api_error)?;

    let bootcamp = bootcamp_service.create(&claims, req).await?;
    let response: BootcampResponse = bootcamp.into();
    info!("Created bootcamp '{}'", response.name);
    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_BOOTCAMP_CREATED, response)))
}

/// Update a bootcamp
///
/// Only the owner or an admin may update. Changing the address re-geocodes the location.
#[utoipa::path(
    put,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    request_body = UpdateBootcampRequest,
    responses(
        (status = 200, description = "Bootcamp updated", body = BootcampResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_bootcamp(
    bootcamp_service: web::Data<BootcampService>,
    AuthUser(claims): AuthUser,
    path: web::Path<String>,
    body: web::Json<UpdateBootcampRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    req.validate().map_err(validation_errors_to_api_error)?;

    let bootcamp = bootcamp_service.update(&path, &claims, req).await?;
    let response: BootcampResponse = bootcamp.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_BOOTCAMP_UPDATED, response)))
}

/// Delete a bootcamp and its courses
#[utoipa::path(
    delete,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Bootcamp deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_bootcamp(
    bootcamp_service: web::Data<BootcampService>,
    AuthUser(claims): AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    bootcamp_service.delete(&path, &claims).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_BOOTCAMP_DELETED, json!({}))))
}

/// Bootcamps within a distance of a zipcode
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/radius/{zipcode}/{distance}",
    tag = "Bootcamps",
    params(
        ("zipcode" = String, Path, description = "Zipcode of the search center"),
        ("distance" = f64, Path, description = "Search radius in kilometers")
    ),
    responses(
        (status = 200, description = "Bootcamps in range", body = ListResponse),
        (status = 400, description = "Invalid distance or unknown zipcode", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bootcamps_in_radius(
    bootcamp_service: web::Data<BootcampService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (zipcode, distance) = path.into_inner();
    let bootcamps = bootcamp_service.within_radius(&zipcode, &distance).await?;
    let data: Vec<BootcampResponse> = bootcamps.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(data)))
}
