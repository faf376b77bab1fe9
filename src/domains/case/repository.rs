use crate::domains::case::types::{Case, CaseRow, CaseStatus, NewCase, UpdateCase};
use crate::domains::core::repository::FindById;
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};
use uuid::Uuid;

/// Trait defining case repository operations
#[async_trait]
pub trait CaseRepository: FindById<Case> + Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Case>>;
    /// All cases whose status counts as active.
    async fn find_active(&self) -> DomainResult<Vec<Case>>;
    /// Active cases for one farm, latest effective assignment first.
    async fn find_active_for_farm(&self, farm_id: Uuid) -> DomainResult<Vec<Case>>;
    /// `Assigned` cases for a consultant, latest effective assignment first.
    async fn find_assigned_for_consultant(&self, consultant_id: Uuid) -> DomainResult<Vec<Case>>;
    async fn create(&self, new_case: &NewCase) -> DomainResult<Case>;
    async fn update(&self, id: Uuid, update: &UpdateCase) -> DomainResult<Case>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// SQLite implementation for CaseRepository
#[derive(Debug, Clone)]
pub struct SqliteCaseRepository {
    pool: SqlitePool,
}

impl SqliteCaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn collect(rows: Vec<CaseRow>) -> DomainResult<Vec<Case>> {
        rows.into_iter()
            .map(CaseRow::into_entity)
            .collect::<DomainResult<Vec<Case>>>()
    }
}

#[async_trait]
impl FindById<Case> for SqliteCaseRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Case> {
        let row = query_as::<_, CaseRow>("SELECT * FROM cases WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| DomainError::EntityNotFound("Case".to_string(), id))?;

        row.into_entity()
    }
}

#[async_trait]
impl CaseRepository for SqliteCaseRepository {
    async fn find_all(&self) -> DomainResult<Vec<Case>> {
        let rows = query_as::<_, CaseRow>("SELECT * FROM cases")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Self::collect(rows)
    }

    async fn find_active(&self) -> DomainResult<Vec<Case>> {
        let rows = query_as::<_, CaseRow>("SELECT * FROM cases WHERE status IN (?, ?)")
            .bind(CaseStatus::Assigned.as_str())
            .bind(CaseStatus::InProgress.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Self::collect(rows)
    }

    async fn find_active_for_farm(&self, farm_id: Uuid) -> DomainResult<Vec<Case>> {
        let rows = query_as::<_, CaseRow>(
            "SELECT * FROM cases WHERE farm_id = ? AND status IN (?, ?)
             ORDER BY COALESCE(assigned_at, created_at) DESC",
        )
        .bind(farm_id.to_string())
        .bind(CaseStatus::Assigned.as_str())
        .bind(CaseStatus::InProgress.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Self::collect(rows)
    }

    async fn find_assigned_for_consultant(&self, consultant_id: Uuid) -> DomainResult<Vec<Case>> {
        let rows = query_as::<_, CaseRow>(
            "SELECT * FROM cases WHERE consultant_id = ? AND status = ?
             ORDER BY COALESCE(assigned_at, created_at) DESC",
        )
        .bind(consultant_id.to_string())
        .bind(CaseStatus::Assigned.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Self::collect(rows)
    }

    async fn create(&self, new_case: &NewCase) -> DomainResult<Case> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        query(
            "INSERT INTO cases (id, farm_id, consultant_id, assigned_by_id, status, priority, notes, created_at, assigned_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(new_case.farm_id.to_string())
        .bind(new_case.consultant_id.to_string())
        .bind(new_case.assigned_by_id.to_string())
        .bind(new_case.status.as_str())
        .bind(&new_case.priority)
        .bind(&new_case.notes)
        .bind(&now)
        .bind(new_case.assigned_at.map(|t| t.to_rfc3339()))
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: &UpdateCase) -> DomainResult<Case> {
        let mut set_clauses: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(consultant_id) = update.consultant_id {
            set_clauses.push("consultant_id = ?");
            params.push(consultant_id.to_string());
        }
        if let Some(status) = update.status {
            set_clauses.push("status = ?");
            params.push(status.as_str().to_string());
        }
        if let Some(priority) = &update.priority {
            set_clauses.push("priority = ?");
            params.push(priority.clone());
        }
        if let Some(notes) = &update.notes {
            set_clauses.push("notes = ?");
            params.push(notes.clone());
        }
        if let Some(assigned_at) = update.assigned_at {
            set_clauses.push("assigned_at = ?");
            params.push(assigned_at.to_rfc3339());
        }

        if set_clauses.is_empty() {
            return self.find_by_id(id).await;
        }

        set_clauses.push("updated_at = ?");
        params.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE cases SET {} WHERE id = ?", set_clauses.join(", "));

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
            return Err(DomainError::EntityNotFound("Case".to_string(), id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = query("DELETE FROM cases WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            Err(DomainError::EntityNotFound("Case".to_string(), id))
        } else {
            Ok(())
        }
    }
}
