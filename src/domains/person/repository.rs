use crate::domains::core::repository::FindById;
use crate::domains::person::types::{NewPerson, Person, PersonRow, UpdatePerson};
use crate::domains::role::types::RoleKind;
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};
use uuid::Uuid;

/// Trait defining person repository operations
#[async_trait]
pub trait PersonRepository: FindById<Person> + Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Person>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Person>>;
    /// Active persons holding the given role, ordered by first then last name.
    async fn find_by_role(&self, role: RoleKind) -> DomainResult<Vec<Person>>;
    async fn create(&self, new_person: &NewPerson) -> DomainResult<Person>;
    async fn update(&self, id: Uuid, update: &UpdatePerson) -> DomainResult<Person>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// SQLite implementation for PersonRepository
#[derive(Debug, Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FindById<Person> for SqlitePersonRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Person> {
        let row = query_as::<_, PersonRow>("SELECT * FROM persons WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| DomainError::EntityNotFound("Person".to_string(), id))?;

        row.into_entity()
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn find_all(&self) -> DomainResult<Vec<Person>> {
        let rows = query_as::<_, PersonRow>("SELECT * FROM persons")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        rows.into_iter()
            .map(PersonRow::into_entity)
            .collect::<DomainResult<Vec<Person>>>()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Person>> {
        let row = query_as::<_, PersonRow>("SELECT * FROM persons WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        row.map(PersonRow::into_entity).transpose()
    }

    async fn find_by_role(&self, role: RoleKind) -> DomainResult<Vec<Person>> {
        let rows = query_as::<_, PersonRow>(
            "SELECT p.* FROM persons p
             JOIN roles r ON r.id = p.role_id
             WHERE r.name = ? AND p.active = 1
             ORDER BY p.first_name ASC, p.last_name ASC",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        rows.into_iter()
            .map(PersonRow::into_entity)
            .collect::<DomainResult<Vec<Person>>>()
    }

    async fn create(&self, new_person: &NewPerson) -> DomainResult<Person> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        query(
            "INSERT INTO persons (id, first_name, last_name, email, role_id, address_id, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&new_person.first_name)
        .bind(&new_person.last_name)
        .bind(&new_person.email)
        .bind(new_person.role_id.to_string())
        .bind(new_person.address_id.map(|a| a.to_string()))
        .bind(new_person.active as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: &UpdatePerson) -> DomainResult<Person> {
        let mut set_clauses: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(first_name) = &update.first_name {
            set_clauses.push("first_name = ?");
            params.push(first_name.clone());
        }
        if let Some(last_name) = &update.last_name {
            set_clauses.push("last_name = ?");
            params.push(last_name.clone());
        }
        if let Some(email) = &update.email {
            set_clauses.push("email = ?");
            params.push(email.clone());
        }

        if set_clauses.is_empty() {
            return self.find_by_id(id).await;
        }

        set_clauses.push("updated_at = ?");
        params.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE persons SET {} WHERE id = ?", set_clauses.join(", "));

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
            return Err(DomainError::EntityNotFound("Person".to_string(), id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = query("DELETE FROM persons WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound("Person".to_string(), id))
        } else {
            Ok(())
        }
    }
}
