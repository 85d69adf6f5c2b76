use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Account roles carried in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Publisher,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Publisher => write!(f, "publisher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: Role,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at timestamp
}

impl Claims {
    /// Check if the claims belong to an admin user
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check if the claims belong to the given owner id
    pub fn is_owner(&self, owner: &ObjectId) -> bool {
        self.sub == owner.to_hex()
    }

    /// Owners and admins may modify a resource
    pub fn can_modify(&self, owner: &ObjectId) -> bool {
        self.is_admin() || self.is_owner(owner)
    }
}
