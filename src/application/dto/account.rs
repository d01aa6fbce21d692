//! User account DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::domain::value_objects::UserRole;

/// User representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email_address: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username,
            email_address: user.email_address,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Payload for registering a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequestDto {
    pub username: String,
    pub email_address: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Payload for updating a user; omitted fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequestDto {
    pub username: Option<String>,
    pub email_address: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
