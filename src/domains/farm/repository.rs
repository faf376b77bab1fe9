use crate::domains::core::repository::FindById;
use crate::domains::farm::types::{Farm, FarmRow, NewFarm, UpdateFarm};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};
use uuid::Uuid;

/// Trait defining farm repository operations
#[async_trait]
pub trait FarmRepository: FindById<Farm> + Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Farm>>;
    async fn find_by_tax_number(&self, tax_number: &str) -> DomainResult<Option<Farm>>;
    /// Batch lookup used when projecting notifications.
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Farm>>;
    async fn create(&self, new_farm: &NewFarm) -> DomainResult<Farm>;
    async fn update(&self, id: Uuid, update: &UpdateFarm) -> DomainResult<Farm>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// SQLite implementation for FarmRepository
#[derive(Debug, Clone)]
pub struct SqliteFarmRepository {
    pool: SqlitePool,
}

impl SqliteFarmRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FindById<Farm> for SqliteFarmRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Farm> {
        let row = query_as::<_, FarmRow>("SELECT * FROM farms WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| DomainError::EntityNotFound("Farm".to_string(), id))?;

        row.into_entity()
    }
}

#[async_trait]
impl FarmRepository for SqliteFarmRepository {
    async fn find_all(&self) -> DomainResult<Vec<Farm>> {
        let rows = query_as::<_, FarmRow>("SELECT * FROM farms")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        rows.into_iter()
            .map(FarmRow::into_entity)
            .collect::<DomainResult<Vec<Farm>>>()
    }

    async fn find_by_tax_number(&self, tax_number: &str) -> DomainResult<Option<Farm>> {
        let row = query_as::<_, FarmRow>("SELECT * FROM farms WHERE tax_number = ?")
            .bind(tax_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        row.map(FarmRow::into_entity).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Farm>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query_str = format!("SELECT * FROM farms WHERE id IN ({})", placeholders);

        let mut query_builder = query_as::<_, FarmRow>(&query_str);
        for id in ids {
            query_builder = query_builder.bind(id.to_string());
        }

        let rows = query_builder
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        rows.into_iter()
            .map(FarmRow::into_entity)
            .collect::<DomainResult<Vec<Farm>>>()
    }

    async fn create(&self, new_farm: &NewFarm) -> DomainResult<Farm> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        query(
            "INSERT INTO farms (id, name, tax_number, owner_id, address_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&new_farm.name)
        .bind(&new_farm.tax_number)
        .bind(new_farm.owner_id.map(|o| o.to_string()))
        .bind(new_farm.address_id.map(|a| a.to_string()))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: &UpdateFarm) -> DomainResult<Farm> {
        let mut set_clauses: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(name) = &update.name {
            set_clauses.push("name = ?");
            params.push(name.clone());
        }
        if let Some(tax_number) = &update.tax_number {
            set_clauses.push("tax_number = ?");
            params.push(tax_number.clone());
        }

        if set_clauses.is_empty() {
            return self.find_by_id(id).await;
        }

        set_clauses.push("updated_at = ?");
        params.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE farms SET {} WHERE id = ?", set_clauses.join(", "));

        let mut query_builder = query(&query_str);
        for param in params {
            query_builder = query_builder.bind(param);
        }
        query_builder = query_builder.bind(id.to_string());

        let result = query_builder
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EntityNotFound("Farm".to_string(), id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = query("DELETE FROM farms WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound("Farm".to_string(), id))
        } else {
            Ok(())
        }
    }
}
