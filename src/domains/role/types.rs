use crate::domains::core::repository::{parse_datetime, parse_uuid};
use crate::errors::DomainResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role entity. The name is a free string at the storage boundary; everything
/// above it works with [`RoleKind`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn kind(&self) -> Option<RoleKind> {
        RoleKind::from_name(&self.name)
    }
}

/// The fixed role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKind {
    Farmer,
    Consultant,
    ArlaEmployee,
    Administrator,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Farmer => "Farmer",
            RoleKind::Consultant => "Consultant",
            RoleKind::ArlaEmployee => "ArlaEmployee",
            RoleKind::Administrator => "Administrator",
        }
    }

    /// Case-insensitive lookup, used immediately after any storage read.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        [
            RoleKind::Farmer,
            RoleKind::Consultant,
            RoleKind::ArlaEmployee,
            RoleKind::Administrator,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
    }
}

/// Database row for `roles`
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RoleRow {
    pub fn into_entity(self) -> DomainResult<Role> {
        Ok(Role {
            id: parse_uuid("id", &self.id)?,
            name: self.name,
            created_at: parse_datetime("created_at", &self.created_at)?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}
