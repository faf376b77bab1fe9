use crate::domains::core::repository::{
    parse_datetime, parse_optional_uuid, parse_uuid,
};
use crate::errors::DomainResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Farm entity. The tax number (CVR) is unique across farms when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub tax_number: Option<String>,
    pub owner_id: Option<Uuid>,
    pub address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewFarm DTO - used when creating a new farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFarm {
    pub name: String,
    pub tax_number: Option<String>,
    pub owner_id: Option<Uuid>,
    pub address_id: Option<Uuid>,
}

/// UpdateFarm DTO - used when patching an existing farm in place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFarm {
    pub name: Option<String>,
    pub tax_number: Option<String>,
}

/// Database row for `farms`
#[derive(Debug, Clone, FromRow)]
pub struct FarmRow {
    pub id: String,
    pub name: String,
    pub tax_number: Option<String>,
    pub owner_id: Option<String>,
    pub address_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl FarmRow {
    pub fn into_entity(self) -> DomainResult<Farm> {
        Ok(Farm {
            id: parse_uuid("id", &self.id)?,
            name: self.name,
            tax_number: self.tax_number,
            owner_id: parse_optional_uuid("owner_id", self.owner_id.as_deref())?,
            address_id: parse_optional_uuid("address_id", self.address_id.as_deref())?,
            created_at: parse_datetime("created_at", &self.created_at)?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}
