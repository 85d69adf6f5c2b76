use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use log::{debug, error, warn};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_DUPLICATE_FIELD, CODE_INTERNAL_ERROR, CODE_INVALID_TOKEN,
    CODE_UPSTREAM_ERROR, ERR_DUPLICATE_FIELD, ERR_GEOCODER_FAILED, ERR_INVALID_TOKEN,
    ERR_SERVER_ERROR, ERR_VALIDATION_FAILED,
};

/// MongoDB server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    Forbidden { code: String, message: String },
    NotFound { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &str, message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn forbidden(code: &str, message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(code: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(code: &str, message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Machine-readable code carried by every variant.
    pub fn code(&self) -> &str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::Unauthorized { code, .. }
            | ApiError::Forbidden { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::InternalServerError { code, .. }
            | ApiError::ValidationError { code, .. } => code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::Unauthorized { code, message } => {
                write!(f, "Unauthorized [{}]: {}", code, message)
            }
            ApiError::Forbidden { code, message } => {
                write!(f, "Forbidden [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        debug!("Responding with error code {}", self.code());
        let body = match self {
            ApiError::BadRequest { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::Forbidden { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::InternalServerError { code, message } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: message.clone(),
                errors: None,
            },
            ApiError::ValidationError { code, errors } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: ERR_VALIDATION_FAILED.to_string(),
                errors: Some(errors.clone()),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return ApiError::bad_request(CODE_DUPLICATE_FIELD, ERR_DUPLICATE_FIELD);
        }

        error!("Database operation failed: {}", err);
        ApiError::internal(CODE_INTERNAL_ERROR, ERR_SERVER_ERROR)
    }
}

impl From<bson::ser::Error> for ApiError {
    fn from(err: bson::ser::Error) -> Self {
        error!("Failed to serialize document: {}", err);
        ApiError::internal(CODE_INTERNAL_ERROR, ERR_SERVER_ERROR)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        error!("Geocoder request failed: {}", err);
        ApiError::internal(CODE_UPSTREAM_ERROR, ERR_GEOCODER_FAILED)
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN)
    }
}

/// Report malformed JSON bodies in the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::bad_request(CODE_BAD_REQUEST, err.to_string()).into()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
