//! Bootcamp photo upload handler.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::info;

use crate::constants::MSG_PHOTO_UPLOADED;
use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::ApiResponse;
use crate::services::BootcampService;

/// Upload a bootcamp photo
///
/// Expects a multipart `file` field holding an image. The stored file name is
/// returned as `data`.
#[utoipa::path(
    put,
    path = "/api/v1/bootcamps/{id}/photo",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Photo image file in the `file` field"),
    responses(
        (status = 200, description = "Photo uploaded", body = String),
        (status = 400, description = "Missing file, not an image, or too large", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_bootcamp_photo(
    bootcamp_service: web::Data<BootcampService>,
    AuthUser(claims): AuthUser,
    path: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let file_name = bootcamp_service
        .upload_photo(&id, &claims, &mut payload)
        .await?;

    info!("Photo {} uploaded for bootcamp {}", file_name, id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PHOTO_UPLOADED, file_name)))
}
