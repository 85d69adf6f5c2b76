//! Authorization helper functions.
//!
//! These helpers reduce boilerplate in handlers by providing common patterns for:
//! - Restricting routes to certain roles
//! - Checking that the caller owns the resource being modified

use log::warn;
use mongodb::bson::oid::ObjectId;

use crate::constants::{CODE_FORBIDDEN, CODE_ROLE_NOT_ALLOWED, ERR_NOT_BOOTCAMP_OWNER};
use crate::errors::ApiError;
use crate::models::{Claims, Role};

/// Roles allowed to publish and manage bootcamps.
pub const PUBLISHING_ROLES: [Role; 2] = [Role::Publisher, Role::Admin];

/// Require one of the given roles or return Forbidden.
///
/// # Example
/// ```ignore
/// require_role(&claims, &PUBLISHING_ROLES)?;
/// ```
pub fn require_role(claims: &Claims, allowed: &[Role]) -> Result<(), ApiError> {
    if !allowed.contains(&claims.role) {
        warn!(
            "User {} with role {} attempted a restricted action",
            claims.sub, claims.role
        );
        return Err(ApiError::forbidden(
            CODE_ROLE_NOT_ALLOWED,
            format!("User role {} is not authorized to access this route", claims.role),
        ));
    }
    Ok(())
}

/// Require that the caller owns the resource or is an admin.
pub fn require_owner(claims: &Claims, owner: &ObjectId) -> Result<(), ApiError> {
    if !claims.can_modify(owner) {
        warn!(
            "User {} (role: {}) attempted to modify a resource owned by {}",
            claims.sub, claims.role, owner
        );
        return Err(ApiError::forbidden(CODE_FORBIDDEN, ERR_NOT_BOOTCAMP_OWNER));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: Role) -> Claims {
        Claims {
            sub: sub.to_string(),
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_plain_users_cannot_publish() {
        let err = require_role(&claims("u", Role::User), &PUBLISHING_ROLES).unwrap_err();
        assert_eq!(err.code(), CODE_ROLE_NOT_ALLOWED);
        assert!(require_role(&claims("p", Role::Publisher), &PUBLISHING_ROLES).is_ok());
        assert!(require_role(&claims("a", Role::Admin), &PUBLISHING_ROLES).is_ok());
    }

    #[test]
    fn test_require_owner() {
        let owner = ObjectId::new();
        assert!(require_owner(&claims(&owner.to_hex(), Role::Publisher), &owner).is_ok());
        assert!(require_owner(&claims("someone-else", Role::Admin), &owner).is_ok());
        let err = require_owner(&claims("someone-else", Role::Publisher), &owner).unwrap_err();
        assert_eq!(err.code(), CODE_FORBIDDEN);
    }
}
