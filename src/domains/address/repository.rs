use crate::domains::address::types::{Address, AddressRow, NewAddress, UpdateAddress};
use crate::domains::core::repository::FindById;
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};
use uuid::Uuid;

/// Trait defining address repository operations
#[async_trait]
pub trait AddressRepository: FindById<Address> + Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Address>>;
    async fn create(&self, new_address: &NewAddress) -> DomainResult<Address>;
    async fn update(&self, id: Uuid, update: &UpdateAddress) -> DomainResult<Address>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// SQLite implementation for AddressRepository
#[derive(Debug, Clone)]
pub struct SqliteAddressRepository {
    pool: SqlitePool,
}

impl SqliteAddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FindById<Address> for SqliteAddressRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Address> {
        let row = query_as::<_, AddressRow>("SELECT * FROM addresses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| DomainError::EntityNotFound("Address".to_string(), id))?;

        row.into_entity()
    }
}

#[async_trait]
impl AddressRepository for SqliteAddressRepository {
    async fn find_all(&self) -> DomainResult<Vec<Address>> {
        let rows = query_as::<_, AddressRow>("SELECT * FROM addresses")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        rows.into_iter()
            .map(AddressRow::into_entity)
            .collect::<DomainResult<Vec<Address>>>()
    }

    async fn create(&self, new_address: &NewAddress) -> DomainResult<Address> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        query(
            "INSERT INTO addresses (id, street, city, postal_code, country, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&new_address.street)
        .bind(&new_address.city)
        .bind(&new_address.postal_code)
        .bind(&new_address.country)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: &UpdateAddress) -> DomainResult<Address> {
        let mut set_clauses: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(street) = &update.street {
            set_clauses.push("street = ?");
            params.push(street.clone());
        }
        if let Some(city) = &update.city {
            set_clauses.push("city = ?");
            params.push(city.clone());
        }
        if let Some(postal_code) = &update.postal_code {
            set_clauses.push("postal_code = ?");
            params.push(postal_code.clone());
        }
        if let Some(country) = &update.country {
            set_clauses.push("country = ?");
            params.push(country.clone());
        }

        if set_clauses.is_empty() {
            return self.find_by_id(id).await;
        }

        set_clauses.push("updated_at = ?");
        params.push(Utc::now().to_rfc3339());

        let query_str = format!(
            "UPDATE addresses SET {} WHERE id = ?",
            set_clauses.join(", ")
        );

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
            return Err(DomainError::EntityNotFound("Address".to_string(), id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = query("DELETE FROM addresses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound("Address".to_string(), id))
        } else {
            Ok(())
        }
    }
}
