//! Request and response models for user accounts.

use serde::{Deserialize, Serialize};

use crate::entities::users;

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login credentials. Held only for the duration of the request.
#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub username: String,
    pub password: String,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Projection of a user record that omits the password hash.
/// Every value returned to a client goes through this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<users::Model> for UserProfile {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role,
        }
    }
}

/// Login result: identity plus the signed session token.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub username: String,
    pub token: String,
}
