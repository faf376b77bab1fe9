use crate::domains::address::repository::AddressRepository;
use crate::domains::address::types::UpdateAddress;
use crate::domains::assignment::types::{
    AssignCaseRequest, AssignmentContext, ConsultantNotification, FarmAssignmentOverview,
    SaveFarmRequest, UpdateCaseRequest,
};
use crate::domains::case::queries::CaseQueries;
use crate::domains::case::repository::CaseRepository;
use crate::domains::case::types::{Case, CaseStatus, NewCase, UpdateCase};
use crate::domains::farm::repository::FarmRepository;
use crate::domains::farm::types::{Farm, NewFarm, UpdateFarm};
use crate::domains::person::repository::PersonRepository;
use crate::domains::person::types::{NewPerson, Person, UpdatePerson};
use crate::domains::role::repository::RoleRepository;
use crate::domains::role::types::RoleKind;
use crate::errors::{DomainError, ServiceResult};
use crate::validation::Validate;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Trait defining the assignment orchestration operations exposed to the
/// presentation layer.
#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Consistent cross-entity snapshot for the assignment screen.
    async fn load_assignment_context(&self) -> ServiceResult<AssignmentContext>;

    /// Assign a new nature check case to a farm.
    async fn assign_case(&self, request: AssignCaseRequest) -> ServiceResult<Case>;

    /// Mutate the farm's active case in place (consultant, priority, notes).
    async fn update_case(&self, farm_id: Uuid, request: UpdateCaseRequest)
        -> ServiceResult<Case>;

    /// Create or update a farm together with its owner and address.
    async fn save_farm(&self, request: SaveFarmRequest) -> ServiceResult<Farm>;

    /// Delete a farm. Missing farms are a silent no-op; farms with an active
    /// case reject deletion.
    async fn delete_farm(&self, farm_id: Uuid) -> ServiceResult<()>;

    /// Freshly assigned cases for one consultant, newest first.
    async fn notifications_for_consultant(
        &self,
        consultant_id: Uuid,
    ) -> ServiceResult<Vec<ConsultantNotification>>;
}

/// Implementation of the assignment service
#[derive(Clone)]
pub struct AssignmentServiceImpl {
    farm_repo: Arc<dyn FarmRepository>,
    person_repo: Arc<dyn PersonRepository>,
    address_repo: Arc<dyn AddressRepository>,
    role_repo: Arc<dyn RoleRepository>,
    case_repo: Arc<dyn CaseRepository>,
    case_queries: CaseQueries,
}

impl AssignmentServiceImpl {
    pub fn new(
        farm_repo: Arc<dyn FarmRepository>,
        person_repo: Arc<dyn PersonRepository>,
        address_repo: Arc<dyn AddressRepository>,
        role_repo: Arc<dyn RoleRepository>,
        case_repo: Arc<dyn CaseRepository>,
    ) -> Self {
        let case_queries = CaseQueries::new(case_repo.clone());
        Self {
            farm_repo,
            person_repo,
            address_repo,
            role_repo,
            case_repo,
            case_queries,
        }
    }

    /// The person must hold exactly the expected role; anything else is a
    /// conflict with existing state, not a missing record.
    async fn ensure_role(&self, person: &Person, expected: RoleKind) -> ServiceResult<()> {
        let role = self.role_repo.find_by_id(person.role_id).await?;
        if role.kind() == Some(expected) {
            Ok(())
        } else {
            Err(DomainError::Conflict(format!(
                "{} holds the role '{}', expected '{}'",
                person.full_name(),
                role.name,
                expected.as_str()
            ))
            .into())
        }
    }

    async fn resolve_owner(&self, request: &SaveFarmRequest) -> ServiceResult<Person> {
        if let Some(existing) = self.person_repo.find_by_email(&request.owner_email).await? {
            // A farmer may own several farms; anyone else cannot be attached
            // as an owner.
            let role = self.role_repo.find_by_id(existing.role_id).await?;
            if role.kind() != Some(RoleKind::Farmer) {
                return Err(DomainError::Conflict(format!(
                    "'{}' already belongs to {} with role '{}', who cannot own a farm",
                    request.owner_email,
                    existing.full_name(),
                    role.name
                ))
                .into());
            }
            return Ok(existing);
        }

        let farmer_role = self
            .role_repo
            .find_by_name(RoleKind::Farmer.as_str())
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "Role '{}' is not configured in storage",
                    RoleKind::Farmer.as_str()
                ))
            })?;

        let address_input = request.address_input();
        let owner_address_id = if address_input.has_content() {
            Some(self.address_repo.create(&address_input).await?.id)
        } else {
            None
        };

        let owner = self
            .person_repo
            .create(&NewPerson {
                first_name: request.owner_first_name.clone(),
                last_name: request.owner_last_name.clone(),
                email: request.owner_email.clone(),
                role_id: farmer_role.id,
                address_id: owner_address_id,
                active: true,
            })
            .await?;

        Ok(owner)
    }

    async fn update_existing_farm(
        &self,
        farm_id: Uuid,
        request: &SaveFarmRequest,
    ) -> ServiceResult<Farm> {
        let farm = self.farm_repo.find_by_id(farm_id).await?;

        if let Some(address_id) = farm.address_id {
            self.address_repo
                .update(
                    address_id,
                    &UpdateAddress {
                        street: Some(request.street.clone()),
                        city: Some(request.city.clone()),
                        postal_code: Some(request.postal_code.clone()),
                        country: Some(request.country.clone()),
                    },
                )
                .await?;
        }

        if let Some(owner_id) = farm.owner_id {
            self.person_repo
                .update(
                    owner_id,
                    &UpdatePerson {
                        first_name: Some(request.owner_first_name.clone()),
                        last_name: Some(request.owner_last_name.clone()),
                        email: Some(request.owner_email.clone()),
                    },
                )
                .await?;
        }

        let updated = self
            .farm_repo
            .update(
                farm_id,
                &UpdateFarm {
                    name: Some(request.farm_name.clone()),
                    tax_number: Some(request.tax_number.trim().to_string()),
                },
            )
            .await?;

        Ok(updated)
    }

    async fn create_farm(&self, request: &SaveFarmRequest) -> ServiceResult<Farm> {
        let tax_number = request.tax_number.trim();
        if !tax_number.is_empty() {
            if let Some(existing) = self.farm_repo.find_by_tax_number(tax_number).await? {
                return Err(DomainError::Conflict(format!(
                    "Tax number '{}' is already registered to farm '{}'",
                    tax_number, existing.name
                ))
                .into());
            }
        }

        let owner = self.resolve_owner(request).await?;

        // The farm always gets its own address record, even when it matches
        // the owner's.
        let farm_address = self.address_repo.create(&request.address_input()).await?;

        let farm = self
            .farm_repo
            .create(&NewFarm {
                name: request.farm_name.clone(),
                tax_number: if tax_number.is_empty() {
                    None
                } else {
                    Some(tax_number.to_string())
                },
                owner_id: Some(owner.id),
                address_id: Some(farm_address.id),
            })
            .await?;

        Ok(farm)
    }
}

#[async_trait]
impl AssignmentService for AssignmentServiceImpl {
    async fn load_assignment_context(&self) -> ServiceResult<AssignmentContext> {
        // Each fetch is its own pool checkout; repository failures propagate
        // here, unlike in the read-side query layer.
        let farms = self.farm_repo.find_all().await?;
        let persons = self.person_repo.find_all().await?;
        let mut consultants = self.person_repo.find_by_role(RoleKind::Consultant).await?;
        let addresses = self.address_repo.find_all().await?;
        let active_cases = self.case_repo.find_active().await?;

        let persons_by_id: HashMap<Uuid, &Person> =
            persons.iter().map(|p| (p.id, p)).collect();
        let addresses_by_id: HashMap<Uuid, _> =
            addresses.iter().map(|a| (a.id, a)).collect();

        // At most one active case per farm is expected; if the invariant was
        // violated at the storage layer, the latest assignment wins.
        let mut active_by_farm: HashMap<Uuid, Case> = HashMap::new();
        for case in active_cases {
            match active_by_farm.get(&case.farm_id) {
                Some(existing)
                    if existing.effective_assigned_at() >= case.effective_assigned_at() => {}
                _ => {
                    active_by_farm.insert(case.farm_id, case);
                }
            }
        }

        let mut overviews: Vec<FarmAssignmentOverview> = Vec::with_capacity(farms.len());
        for farm in &farms {
            let owner = farm.owner_id.and_then(|id| persons_by_id.get(&id));
            let address = farm.address_id.and_then(|id| addresses_by_id.get(&id));
            let active = active_by_farm.get(&farm.id);
            let consultant = active.and_then(|c| persons_by_id.get(&c.consultant_id));

            overviews.push(FarmAssignmentOverview {
                farm_id: farm.id,
                farm_name: farm.name.clone(),
                tax_number: farm.tax_number.clone(),
                owner_name: owner.map(|p| p.full_name()),
                owner_email: owner.map(|p| p.email.clone()),
                street: address.map(|a| a.street.clone()),
                city: address.map(|a| a.city.clone()),
                postal_code: address.map(|a| a.postal_code.clone()),
                has_active_case: active.is_some(),
                active_case_id: active.map(|c| c.id),
                consultant_id: active.map(|c| c.consultant_id),
                consultant_name: consultant.map(|p| p.full_name()),
                priority: active.map(|c| c.priority.clone()),
                notes: active.map(|c| c.notes.clone()),
            });
        }

        overviews.sort_by(|a, b| a.farm_name.cmp(&b.farm_name));
        consultants.sort_by(|a, b| {
            (a.first_name.as_str(), a.last_name.as_str())
                .cmp(&(b.first_name.as_str(), b.last_name.as_str()))
        });

        Ok(AssignmentContext {
            farms: overviews,
            consultants,
        })
    }

    async fn assign_case(&self, request: AssignCaseRequest) -> ServiceResult<Case> {
        request.validate()?;

        let farm = self.farm_repo.find_by_id(request.farm_id).await?;
        let consultant = self.person_repo.find_by_id(request.consultant_id).await?;
        self.ensure_role(&consultant, RoleKind::Consultant).await?;

        if !request.allow_duplicate_active_case
            && self.case_queries.farm_has_active_case(farm.id).await
        {
            return Err(DomainError::Conflict(format!(
                "Farm '{}' already has an active nature check case",
                farm.name
            ))
            .into());
        }

        let case = self
            .case_repo
            .create(&NewCase {
                farm_id: farm.id,
                consultant_id: consultant.id,
                assigned_by_id: request.assigned_by_id,
                status: CaseStatus::Assigned,
                priority: request.priority,
                notes: request.notes,
                assigned_at: Some(Utc::now()),
            })
            .await?;

        Ok(case)
    }

    async fn update_case(
        &self,
        farm_id: Uuid,
        request: UpdateCaseRequest,
    ) -> ServiceResult<Case> {
        request.validate()?;

        let case = self
            .case_queries
            .active_case_for_farm(farm_id)
            .await
            .ok_or_else(|| {
                DomainError::EntityNotFound("Active nature check case for farm".to_string(), farm_id)
            })?;

        let consultant = self.person_repo.find_by_id(request.consultant_id).await?;
        self.ensure_role(&consultant, RoleKind::Consultant).await?;

        // In-place transition: the case identifier and creation time survive.
        let updated = self
            .case_repo
            .update(
                case.id,
                &UpdateCase {
                    consultant_id: Some(consultant.id),
                    status: None,
                    priority: Some(request.priority),
                    notes: Some(request.notes),
                    assigned_at: Some(Utc::now()),
                },
            )
            .await?;

        Ok(updated)
    }

    async fn save_farm(&self, request: SaveFarmRequest) -> ServiceResult<Farm> {
        request.validate()?;

        match request.farm_id {
            Some(farm_id) => self.update_existing_farm(farm_id, &request).await,
            None => self.create_farm(&request).await,
        }
    }

    async fn delete_farm(&self, farm_id: Uuid) -> ServiceResult<()> {
        let farm = match self.farm_repo.find_by_id(farm_id).await {
            Ok(farm) => farm,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if self.case_queries.farm_has_active_case(farm.id).await {
            return Err(DomainError::Conflict(format!(
                "Farm '{}' cannot be deleted while it has an active nature check case",
                farm.name
            ))
            .into());
        }

        self.farm_repo.delete(farm.id).await?;
        Ok(())
    }

    async fn notifications_for_consultant(
        &self,
        consultant_id: Uuid,
    ) -> ServiceResult<Vec<ConsultantNotification>> {
        let cases = self
            .case_queries
            .assigned_cases_for_consultant(consultant_id)
            .await;
        if cases.is_empty() {
            return Ok(Vec::new());
        }

        let farm_ids: Vec<Uuid> = cases
            .iter()
            .map(|c| c.farm_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let farms_by_id: HashMap<Uuid, Farm> = self
            .farm_repo
            .find_by_ids(&farm_ids)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        let mut notifications: Vec<ConsultantNotification> = cases
            .into_iter()
            .filter_map(|case| {
                // A case whose farm vanished is an orphan; skip it rather
                // than failing the whole view.
                let farm = farms_by_id.get(&case.farm_id)?;
                Some(ConsultantNotification {
                    case_id: case.id,
                    farm_id: case.farm_id,
                    farm_name: farm.name.clone(),
                    assigned_at: case.effective_assigned_at(),
                    priority: case.priority,
                    notes: case.notes,
                })
            })
            .collect();

        notifications.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(notifications)
    }
}
