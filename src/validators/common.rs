//! Common validation utilities and helpers.

use std::path::Path;

use validator::ValidationErrors;

use crate::constants::{
    CODE_FILE_TOO_LARGE, CODE_INVALID_FILE_TYPE, CODE_VALIDATION_FAILED, ERR_INVALID_FILE_TYPE,
};
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// This helper function extracts error messages from ValidationErrors
/// and converts them into a format suitable for API responses.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            })
        })
        .collect();
    errors.sort();
    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}

/// Validate photo content type.
///
/// Any `image/*` type is accepted.
pub fn validate_photo_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) if ct.starts_with("image") => Ok(()),
        _ => Err(ApiError::bad_request(
            CODE_INVALID_FILE_TYPE,
            ERR_INVALID_FILE_TYPE,
        )),
    }
}

/// Validate photo file size against the configured maximum.
pub fn validate_photo_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        return Err(ApiError::bad_request(
            CODE_FILE_TOO_LARGE,
            format!("Please upload an image less than {} bytes", max_size),
        ));
    }
    Ok(())
}

/// File extension (with leading dot) for an uploaded photo.
///
/// Taken from the client file name when it has one, else from the content type.
pub fn photo_extension(filename: Option<&str>, content_type: Option<&str>) -> String {
    let from_name = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return format!(".{}", ext.to_ascii_lowercase());
    }

    let ext = match content_type {
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        _ => "jpg",
    };
    format!(".{}", ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_content_type_must_be_image() {
        assert!(validate_photo_content_type(Some("image/jpeg")).is_ok());
        assert!(validate_photo_content_type(Some("image/svg+xml")).is_ok());
        assert_eq!(
            validate_photo_content_type(Some("application/pdf"))
                .unwrap_err()
                .code(),
            CODE_INVALID_FILE_TYPE
        );
        assert!(validate_photo_content_type(None).is_err());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_photo_size(1000, 1000).is_ok());
        let err = validate_photo_size(1001, 1000).unwrap_err();
        assert_eq!(err.code(), CODE_FILE_TOO_LARGE);
        assert!(err.to_string().contains("1000 bytes"));
    }

    #[test]
    fn test_extension_prefers_file_name() {
        assert_eq!(photo_extension(Some("campus.PNG"), Some("image/jpeg")), ".png");
        assert_eq!(photo_extension(Some("photo"), Some("image/gif")), ".gif");
        assert_eq!(photo_extension(None, Some("image/webp")), ".webp");
        assert_eq!(photo_extension(None, None), ".jpg");
    }

    #[test]
    fn test_extension_ignores_path_tricks() {
        assert_eq!(photo_extension(Some("../../etc/passwd."), None), ".jpg");
        assert_eq!(photo_extension(Some("x.p/g"), Some("image/png")), ".png");
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("Name can not be more than 50 characters".into());
        errors.add("name", err);
        errors.add("phone", ValidationError::new("length"));

        match validation_errors_to_api_error(errors) {
            ApiError::ValidationError { code, errors } => {
                assert_eq!(code, CODE_VALIDATION_FAILED);
                assert_eq!(
                    errors,
                    vec![
                        "Invalid value for phone".to_string(),
                        "Name can not be more than 50 characters".to_string(),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
