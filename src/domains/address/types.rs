use crate::domains::core::repository::{parse_datetime, parse_uuid};
use crate::errors::DomainResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Address entity, owned by exactly one farm or person at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewAddress DTO - used when creating a new address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl NewAddress {
    /// True when at least one field carries a non-blank value.
    pub fn has_content(&self) -> bool {
        !self.street.trim().is_empty()
            || !self.city.trim().is_empty()
            || !self.postal_code.trim().is_empty()
            || !self.country.trim().is_empty()
    }
}

/// UpdateAddress DTO - used when patching an existing address in place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Database row for `addresses`
#[derive(Debug, Clone, FromRow)]
pub struct AddressRow {
    pub id: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AddressRow {
    pub fn into_entity(self) -> DomainResult<Address> {
        Ok(Address {
            id: parse_uuid("id", &self.id)?,
            street: self.street,
            city: self.city,
            postal_code: self.postal_code,
            country: self.country,
            created_at: parse_datetime("created_at", &self.created_at)?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}
