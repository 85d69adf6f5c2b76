//! JWT authentication extractor for protected routes.
//!
//! Tokens are issued by the accounts service; this API only verifies them
//! with the shared secret.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::{error, warn};

use crate::config::Config;
use crate::constants::{
    CODE_AUTH_REQUIRED, CODE_INTERNAL_ERROR, ERR_AUTH_REQUIRED, ERR_SERVER_ERROR,
};
use crate::errors::ApiError;
use crate::models::Claims;

/// Name of the cookie that may carry the access token.
pub const TOKEN_COOKIE: &str = "token";

/// Extractor that validates the access token and provides its claims.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(claims): AuthUser) -> Result<HttpResponse, ApiError> {
///     // claims.sub is the authenticated user id
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let config = req.app_data::<web::Data<Config>>().ok_or_else(|| {
        error!("Config is not registered as app data");
        ApiError::internal(CODE_INTERNAL_ERROR, ERR_SERVER_ERROR)
    })?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());
    let cookie = req.cookie(TOKEN_COOKIE);

    let token = extract_token(header, cookie.as_ref().map(|c| c.value())).ok_or_else(|| {
        warn!("Rejected request to {} without a token", req.path());
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })?;

    let claims = decode_token(token, &config.jwt_secret).inspect_err(|_| {
        warn!("Rejected request to {} with an invalid token", req.path());
    })?;

    Ok(AuthUser(claims))
}

/// Pick the token from a `Bearer` authorization header, falling back to the cookie.
pub fn extract_token<'a>(header: Option<&'a str>, cookie: Option<&'a str>) -> Option<&'a str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| cookie.filter(|t| !t.is_empty()))
}

/// Verify an HS256 token and return its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CODE_INVALID_TOKEN;
    use crate::models::Role;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(role: Role, exp_offset_secs: i64, secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "5d7a514b5d2c12c7449be042".to_string(),
            role,
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        assert_eq!(extract_token(Some("Bearer abc"), Some("def")), Some("abc"));
        assert_eq!(extract_token(Some("Basic abc"), Some("def")), Some("def"));
        assert_eq!(extract_token(None, Some("def")), Some("def"));
        assert_eq!(extract_token(Some("Bearer "), None), None);
        assert_eq!(extract_token(None, None), None);
    }

    #[test]
    fn test_decode_valid_token() {
        let token = token_for(Role::Publisher, 3600, SECRET);
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.role, Role::Publisher);
        assert_eq!(claims.sub, "5d7a514b5d2c12c7449be042");
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = token_for(Role::Admin, 3600, "other-secret");
        let err = decode_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code(), CODE_INVALID_TOKEN);
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let token = token_for(Role::User, -3600, SECRET);
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_token("not.a.token", SECRET).is_err());
    }
}
