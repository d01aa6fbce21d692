//! Reference data service - schools of magic, damage types, classes,
//! and the read-only coin/ability/skill tables

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::entities::{Ability, Class, CoinType, DamageType, SchoolOfMagic, Skill};
use crate::domain::value_objects::{ClassId, DamageTypeId, SchoolId};
use crate::infrastructure::persistence::SqliteRepository;

/// Reference data service trait defining the application use cases
#[async_trait]
pub trait ReferenceService: Send + Sync {
    /// List all schools of magic
    async fn list_schools(&self) -> Result<Vec<SchoolOfMagic>>;

    /// Create a school of magic
    async fn create_school(&self, name: &str) -> Result<SchoolOfMagic>;

    /// Delete a school of magic
    async fn delete_school(&self, id: SchoolId) -> Result<()>;

    /// List all damage types
    async fn list_damage_types(&self) -> Result<Vec<DamageType>>;

    /// Create a damage type
    async fn create_damage_type(&self, name: &str) -> Result<DamageType>;

    /// Delete a damage type
    async fn delete_damage_type(&self, id: DamageTypeId) -> Result<()>;

    /// List all classes
    async fn list_classes(&self) -> Result<Vec<Class>>;

    /// Create a class
    async fn create_class(&self, name: &str) -> Result<Class>;

    /// Delete a class
    async fn delete_class(&self, id: ClassId) -> Result<()>;

    /// List all coin denominations
    async fn list_coin_types(&self) -> Result<Vec<CoinType>>;

    /// List all abilities
    async fn list_abilities(&self) -> Result<Vec<Ability>>;

    /// List all skills
    async fn list_skills(&self) -> Result<Vec<Skill>>;
}

/// Default implementation of ReferenceService using the SQLite repository
pub struct ReferenceServiceImpl {
    repository: SqliteRepository,
}

impl ReferenceServiceImpl {
    pub fn new(repository: SqliteRepository) -> Self {
        Self { repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Name cannot be empty");
        }
        if name.len() > 128 {
            anyhow::bail!("Name cannot exceed 128 characters");
        }
        Ok(())
    }
}

#[async_trait]
impl ReferenceService for ReferenceServiceImpl {
    #[instrument(skip(self))]
    async fn list_schools(&self) -> Result<Vec<SchoolOfMagic>> {
        self.repository.reference().list_schools().await
    }

    #[instrument(skip(self))]
    async fn create_school(&self, name: &str) -> Result<SchoolOfMagic> {
        Self::validate_name(name)?;
        self.repository.reference().create_school(name).await
    }

    #[instrument(skip(self))]
    async fn delete_school(&self, id: SchoolId) -> Result<()> {
        if !self.repository.reference().delete_school(id).await? {
            anyhow::bail!("School of magic not found: {}", id);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_damage_types(&self) -> Result<Vec<DamageType>> {
        self.repository.reference().list_damage_types().await
    }

    #[instrument(skip(self))]
    async fn create_damage_type(&self, name: &str) -> Result<DamageType> {
        Self::validate_name(name)?;
        self.repository.reference().create_damage_type(name).await
    }

    #[instrument(skip(self))]
    async fn delete_damage_type(&self, id: DamageTypeId) -> Result<()> {
        if !self.repository.reference().delete_damage_type(id).await? {
            anyhow::bail!("Damage type not found: {}", id);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.repository.reference().list_classes().await
    }

    #[instrument(skip(self))]
    async fn create_class(&self, name: &str) -> Result<Class> {
        Self::validate_name(name)?;
        self.repository.reference().create_class(name).await
    }

    #[instrument(skip(self))]
    async fn delete_class(&self, id: ClassId) -> Result<()> {
        if !self.repository.reference().delete_class(id).await? {
            anyhow::bail!("Class not found: {}", id);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_coin_types(&self) -> Result<Vec<CoinType>> {
        self.repository.reference().list_coin_types().await
    }

    #[instrument(skip(self))]
    async fn list_abilities(&self) -> Result<Vec<Ability>> {
        self.repository.reference().list_abilities().await
    }

    #[instrument(skip(self))]
    async fn list_skills(&self) -> Result<Vec<Skill>> {
        self.repository.reference().list_skills().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(ReferenceServiceImpl::validate_name("Evocation").is_ok());
        assert!(ReferenceServiceImpl::validate_name("  ").is_err());
        assert!(ReferenceServiceImpl::validate_name(&"x".repeat(129)).is_err());
    }
}
