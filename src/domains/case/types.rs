use crate::domains::core::repository::{
    parse_datetime, parse_optional_datetime, parse_uuid,
};
use crate::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a nature check case.
///
/// `Assigned` and `InProgress` count as active; the transition to `Completed`
/// happens outside the assignment core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Assigned,
    InProgress,
    Completed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Assigned => "Assigned",
            CaseStatus::InProgress => "InProgress",
            CaseStatus::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Assigned" => Some(CaseStatus::Assigned),
            "InProgress" => Some(CaseStatus::InProgress),
            "Completed" => Some(CaseStatus::Completed),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CaseStatus::Assigned | CaseStatus::InProgress)
    }
}

/// Nature check case entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub consultant_id: Uuid,
    pub assigned_by_id: Uuid,
    pub status: CaseStatus,
    pub priority: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Assignment time falling back to creation time when none was stamped.
    pub fn effective_assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at.unwrap_or(self.created_at)
    }
}

/// NewCase DTO - used when creating a new case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    pub farm_id: Uuid,
    pub consultant_id: Uuid,
    pub assigned_by_id: Uuid,
    pub status: CaseStatus,
    pub priority: String,
    pub notes: String,
    pub assigned_at: Option<DateTime<Utc>>,
}

/// UpdateCase DTO - used when mutating an existing case in place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCase {
    pub consultant_id: Option<Uuid>,
    pub status: Option<CaseStatus>,
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
}

/// Database row for `cases`
#[derive(Debug, Clone, FromRow)]
pub struct CaseRow {
    pub id: String,
    pub farm_id: String,
    pub consultant_id: String,
    pub assigned_by_id: String,
    pub status: String,
    pub priority: String,
    pub notes: String,
    pub created_at: String,
    pub assigned_at: Option<String>,
    pub updated_at: String,
}

impl CaseRow {
    pub fn into_entity(self) -> DomainResult<Case> {
        let status = CaseStatus::parse(&self.status).ok_or_else(|| {
            DomainError::Internal(format!("Unknown case status '{}'", self.status))
        })?;

        Ok(Case {
            id: parse_uuid("id", &self.id)?,
            farm_id: parse_uuid("farm_id", &self.farm_id)?,
            consultant_id: parse_uuid("consultant_id", &self.consultant_id)?,
            assigned_by_id: parse_uuid("assigned_by_id", &self.assigned_by_id)?,
            status,
            priority: self.priority,
            notes: self.notes,
            created_at: parse_datetime("created_at", &self.created_at)?,
            assigned_at: parse_optional_datetime("assigned_at", self.assigned_at.as_deref())?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_active_set() {
        assert!(CaseStatus::Assigned.is_active());
        assert!(CaseStatus::InProgress.is_active());
        assert!(!CaseStatus::Completed.is_active());
    }

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [CaseStatus::Assigned, CaseStatus::InProgress, CaseStatus::Completed] {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CaseStatus::parse("Cancelled"), None);
    }

    #[test]
    fn effective_assignment_time_falls_back_to_creation() {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let assigned = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();

        let mut case = Case {
            id: Uuid::new_v4(),
            farm_id: Uuid::new_v4(),
            consultant_id: Uuid::new_v4(),
            assigned_by_id: Uuid::new_v4(),
            status: CaseStatus::Assigned,
            priority: "High".to_string(),
            notes: String::new(),
            created_at: created,
            assigned_at: Some(assigned),
            updated_at: created,
        };
        assert_eq!(case.effective_assigned_at(), assigned);

        case.assigned_at = None;
        assert_eq!(case.effective_assigned_at(), created);
    }
}
