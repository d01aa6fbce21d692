//! Account service - application use cases for user accounts

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{NewUser, User};
use crate::domain::value_objects::{UserId, UserRole};
use crate::infrastructure::persistence::SqliteRepository;

/// Request to update an existing user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email_address: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Account service trait defining the application use cases
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user account
    async fn create_user(&self, new: NewUser) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// List all user accounts
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Update a user account
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> Result<User>;

    /// Delete a user account
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// Default implementation of AccountService using the SQLite repository
pub struct AccountServiceImpl {
    repository: SqliteRepository,
}

impl AccountServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_username(username: &str) -> Result<()> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Username cannot be empty");
        }
        if trimmed.len() > 24 {
            anyhow::bail!("Username cannot exceed 24 characters");
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("Username may only contain letters, digits, '_' and '-'");
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<()> {
        if email.len() < 3 || email.len() > 255 {
            anyhow::bail!("Email address must be between 3 and 255 characters");
        }
        let Some((local, domain)) = email.split_once('@') else {
            anyhow::bail!("Email address must contain '@'");
        };
        if local.is_empty() || domain.is_empty() {
            anyhow::bail!("Email address is malformed");
        }
        Ok(())
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    #[instrument(skip(self, new), fields(username = %new.username))]
    async fn create_user(&self, new: NewUser) -> Result<User> {
        Self::validate_username(&new.username)?;
        Self::validate_email(&new.email_address)?;
        if self
            .repository
            .users()
            .get_by_username(&new.username)
            .await?
            .is_some()
        {
            anyhow::bail!("User already exists: {}", new.username);
        }

        self.repository.users().create(new).await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.repository.users().get(id).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>> {
        self.repository.users().list().await
    }

    #[instrument(skip(self, request))]
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> Result<User> {
        let mut user = self
            .repository
            .users()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found: {}", id))?;

        if let Some(username) = request.username {
            Self::validate_username(&username)?;
            user.username = username;
        }
        if let Some(email_address) = request.email_address {
            Self::validate_email(&email_address)?;
            user.email_address = email_address;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }

        self.repository.users().update(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<()> {
        if !self.repository.users().delete(id).await? {
            anyhow::bail!("User not found: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(AccountServiceImpl::validate_username("flinty_42").is_ok());
        assert!(AccountServiceImpl::validate_username("").is_err());
        assert!(AccountServiceImpl::validate_username("has spaces").is_err());
        assert!(AccountServiceImpl::validate_username(&"x".repeat(24)).is_ok());
        assert!(AccountServiceImpl::validate_username(&"x".repeat(25)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(AccountServiceImpl::validate_email("a@b.com").is_ok());
        assert!(AccountServiceImpl::validate_email("no-at-sign").is_err());
        assert!(AccountServiceImpl::validate_email("@missing-local").is_err());
        assert!(AccountServiceImpl::validate_email("missing-domain@").is_err());

        let at_cap = format!("a@{}", "b".repeat(253));
        assert_eq!(at_cap.len(), 255);
        assert!(AccountServiceImpl::validate_email(&at_cap).is_ok());
        assert!(AccountServiceImpl::validate_email(&format!("{}b", at_cap)).is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let service = AccountServiceImpl::new(repository);

        service
            .create_user(NewUser {
                username: "flinty".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap();

        let err = service
            .create_user(NewUser {
                username: "flinty".to_string(),
                email_address: "other@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_changes_username_and_email() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let service = AccountServiceImpl::new(repository);

        let user = service
            .create_user(NewUser {
                username: "flinty".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap();

        let updated = service
            .update_user(
                user.id,
                UpdateUserRequest {
                    username: Some("flint_ironstag".to_string()),
                    email_address: Some("flint@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "flint_ironstag");
        assert_eq!(updated.email_address, "flint@example.com");

        let err = service
            .update_user(
                user.id,
                UpdateUserRequest {
                    username: Some("x".repeat(25)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("24 characters"));
    }
}
