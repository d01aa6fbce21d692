//! User account entity

use crate::domain::value_objects::{UserId, UserRole};

/// A user account. Carries no timestamps.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email_address: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Field set for an account that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email_address: String,
    pub role: UserRole,
}
