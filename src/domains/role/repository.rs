use crate::domains::core::repository::FindById;
use crate::domains::role::types::{Role, RoleRow};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};
use uuid::Uuid;

/// Trait defining role repository operations
#[async_trait]
pub trait RoleRepository: FindById<Role> + Send + Sync {
    /// Case-insensitive name lookup.
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
}

/// SQLite implementation for RoleRepository
#[derive(Debug, Clone)]
pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FindById<Role> for SqliteRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Role> {
        let row = query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| DomainError::EntityNotFound("Role".to_string(), id))?;

        row.into_entity()
    }
}

#[async_trait]
impl RoleRepository for SqliteRoleRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        // The name column carries NOCASE collation.
        let row = query_as::<_, RoleRow>("SELECT * FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        row.map(RoleRow::into_entity).transpose()
    }
}
