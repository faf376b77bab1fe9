use crate::domains::address::types::NewAddress;
use crate::domains::person::types::Person;
use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to assign a new nature check case to a farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignCaseRequest {
    pub farm_id: Uuid,
    pub consultant_id: Uuid,
    pub assigned_by_id: Uuid,
    pub priority: String,
    pub notes: String,
    /// Explicit override of the one-active-case-per-farm rule.
    #[serde(default)]
    pub allow_duplicate_active_case: bool,
}

impl Validate for AssignCaseRequest {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("farm_id", Some(self.farm_id))
            .not_nil()
            .validate()?;
        ValidationBuilder::new("consultant_id", Some(self.consultant_id))
            .not_nil()
            .validate()?;
        ValidationBuilder::new("assigned_by_id", Some(self.assigned_by_id))
            .not_nil()
            .validate()?;
        Ok(())
    }
}

/// Request to re-point a farm's active case at another consultant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCaseRequest {
    pub consultant_id: Uuid,
    pub priority: String,
    pub notes: String,
}

impl Validate for UpdateCaseRequest {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("consultant_id", Some(self.consultant_id))
            .not_nil()
            .validate()
    }
}

/// Request to create or update a farm together with its owner and address.
///
/// A present `farm_id` selects the update path; absence selects create. The
/// address fields serve both the farm address and, on the create path, the
/// owner's address when any of them is non-blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveFarmRequest {
    pub farm_id: Option<Uuid>,
    pub farm_name: String,
    pub tax_number: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email: String,
}

impl SaveFarmRequest {
    pub fn address_input(&self) -> NewAddress {
        NewAddress {
            street: self.street.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

impl Validate for SaveFarmRequest {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("farm_name", Some(self.farm_name.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("tax_number", Some(self.tax_number.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("owner_first_name", Some(self.owner_first_name.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("owner_last_name", Some(self.owner_last_name.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("owner_email", Some(self.owner_email.clone()))
            .not_blank()
            .email()
            .validate()?;
        Ok(())
    }
}

/// One farm joined with its owner, address and active case, for the
/// assignment screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmAssignmentOverview {
    pub farm_id: Uuid,
    pub farm_name: String,
    pub tax_number: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub has_active_case: bool,
    pub active_case_id: Option<Uuid>,
    pub consultant_id: Option<Uuid>,
    pub consultant_name: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// An active, freshly assigned case surfaced to its consultant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsultantNotification {
    pub case_id: Uuid,
    pub farm_id: Uuid,
    pub farm_name: String,
    /// Assignment time falling back to the case's creation time.
    pub assigned_at: DateTime<Utc>,
    pub priority: String,
    pub notes: String,
}

/// Snapshot needed to render an assignment screen: overviews ordered by farm
/// name, eligible consultants ordered by first then last name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentContext {
    pub farms: Vec<FarmAssignmentOverview>,
    pub consultants: Vec<Person>,
}
