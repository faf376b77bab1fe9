use crate::domains::core::repository::{
    parse_datetime, parse_optional_uuid, parse_uuid,
};
use crate::errors::DomainResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Person entity - farmers, consultants, Arla employees and administrators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: Uuid,
    pub address_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// NewPerson DTO - used when creating a new person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: Uuid,
    pub address_id: Option<Uuid>,
    pub active: bool,
}

/// UpdatePerson DTO - used when patching an existing person in place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Database row for `persons`
#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: String,
    pub address_id: Option<String>,
    pub active: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl PersonRow {
    pub fn into_entity(self) -> DomainResult<Person> {
        Ok(Person {
            id: parse_uuid("id", &self.id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role_id: parse_uuid("role_id", &self.role_id)?,
            address_id: parse_optional_uuid("address_id", self.address_id.as_deref())?,
            active: self.active != 0,
            created_at: parse_datetime("created_at", &self.created_at)?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}
