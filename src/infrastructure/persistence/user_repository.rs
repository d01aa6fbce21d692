//! User account repository

use anyhow::Result;
use sqlx::{FromRow, SqlitePool};

use super::map_insert_error;
use crate::domain::entities::{NewUser, User};
use crate::domain::value_objects::{UserId, UserRole};

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email_address: String,
    role: String,
    is_active: bool,
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: UserId::new(row.id),
        username: row.username,
        email_address: row.email_address,
        role: UserRole::parse(&row.role).unwrap_or_default(),
        is_active: row.is_active,
    }
}

/// Repository for user accounts
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO user (username, email_address, role, is_active) VALUES (?, ?, ?, 1)",
        )
        .bind(&new.username)
        .bind(&new.email_address)
        .bind(new.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "user", &new.username))?;

        tracing::debug!("Created user: {}", new.username);
        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            username: new.username,
            email_address: new.email_address,
            role: new.role,
            is_active: true,
        })
    }

    pub async fn get(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email_address, role, is_active FROM user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email_address, role, is_active FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email_address, role, is_active FROM user ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(user_from_row).collect())
    }

    pub async fn update(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            "UPDATE user SET username = ?, email_address = ?, role = ?, is_active = ?
             WHERE id = ?",
        )
        .bind(&user.username)
        .bind(&user.email_address)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "user", &user.username))?;

        if result.rows_affected() == 0 {
            anyhow::bail!("user not found: {}", user.id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;

    #[tokio::test]
    async fn test_create_defaults_to_active_member() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let users = repository.users();

        let user = users
            .create(NewUser {
                username: "flinty".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap();

        assert!(user.is_active);
        let fetched = users.get(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.role, UserRole::Member);
        assert_eq!(fetched.username, "flinty");
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_conflict() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let users = repository.users();

        users
            .create(NewUser {
                username: "flinty".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap();

        // Same username
        let err = users
            .create(NewUser {
                username: "flinty".to_string(),
                email_address: "other@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // Same email
        let err = users
            .create(NewUser {
                username: "other".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_role_and_deactivate() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        let users = repository.users();

        let mut user = users
            .create(NewUser {
                username: "flinty".to_string(),
                email_address: "flinty@example.com".to_string(),
                role: UserRole::Member,
            })
            .await
            .unwrap();

        user.role = UserRole::Admin;
        user.is_active = false;
        users.update(&user).await.unwrap();

        let fetched = users.get(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.role, UserRole::Admin);
        assert!(!fetched.is_active);
    }
}
