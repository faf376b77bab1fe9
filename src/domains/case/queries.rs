use crate::domains::case::repository::CaseRepository;
use crate::domains::case::types::Case;
use std::sync::Arc;
use uuid::Uuid;

/// Read-side convenience queries over the case repository.
///
/// Unlike the orchestration service, this layer swallows infrastructure
/// failures: a storage error degrades to an empty or negative result so the
/// presentation layer can keep rendering. The asymmetry is deliberate; callers
/// rely on these failure modes.
#[derive(Clone)]
pub struct CaseQueries {
    repo: Arc<dyn CaseRepository>,
}

impl CaseQueries {
    pub fn new(repo: Arc<dyn CaseRepository>) -> Self {
        Self { repo }
    }

    /// All cases currently in an active status.
    pub async fn active_cases(&self) -> Vec<Case> {
        match self.repo.find_active().await {
            Ok(cases) => cases,
            Err(e) => {
                log::warn!("active_cases degraded to empty result: {}", e);
                Vec::new()
            }
        }
    }

    /// True when the farm has at least one active case.
    pub async fn farm_has_active_case(&self, farm_id: Uuid) -> bool {
        match self.repo.find_active_for_farm(farm_id).await {
            Ok(cases) => !cases.is_empty(),
            Err(e) => {
                log::warn!("farm_has_active_case({}) degraded to false: {}", farm_id, e);
                false
            }
        }
    }

    /// The farm's active case, if any. More than one active case violates the
    /// one-active-case invariant; the latest-assigned one wins.
    pub async fn active_case_for_farm(&self, farm_id: Uuid) -> Option<Case> {
        match self.repo.find_active_for_farm(farm_id).await {
            Ok(cases) => {
                if cases.len() > 1 {
                    log::warn!(
                        "farm {} has {} active cases; expected at most one",
                        farm_id,
                        cases.len()
                    );
                }
                cases.into_iter().next()
            }
            Err(e) => {
                log::warn!("active_case_for_farm({}) degraded to none: {}", farm_id, e);
                None
            }
        }
    }

    /// `Assigned` cases for a consultant, newest effective assignment first.
    pub async fn assigned_cases_for_consultant(&self, consultant_id: Uuid) -> Vec<Case> {
        match self.repo.find_assigned_for_consultant(consultant_id).await {
            Ok(cases) => cases,
            Err(e) => {
                log::warn!(
                    "assigned_cases_for_consultant({}) degraded to empty result: {}",
                    consultant_id,
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::case::types::{CaseStatus, NewCase, UpdateCase};
    use crate::domains::core::repository::FindById;
    use crate::errors::{DbError, DomainError, DomainResult};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    /// Repository stub that either serves a fixed case list or fails every call.
    struct StubCaseRepository {
        cases: Vec<Case>,
        failing: bool,
    }

    impl StubCaseRepository {
        fn serving(cases: Vec<Case>) -> Arc<Self> {
            Arc::new(Self { cases, failing: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { cases: Vec::new(), failing: true })
        }

        fn guard(&self) -> DomainResult<()> {
            if self.failing {
                Err(DomainError::Database(DbError::ConnectionPool(
                    "storage unreachable".to_string(),
                )))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FindById<Case> for StubCaseRepository {
        async fn find_by_id(&self, id: Uuid) -> DomainResult<Case> {
            self.guard()?;
            self.cases
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| DomainError::EntityNotFound("Case".to_string(), id))
        }
    }

    #[async_trait]
    impl CaseRepository for StubCaseRepository {
        async fn find_all(&self) -> DomainResult<Vec<Case>> {
            self.guard()?;
            Ok(self.cases.clone())
        }

        async fn find_active(&self) -> DomainResult<Vec<Case>> {
            self.guard()?;
            Ok(self.cases.iter().filter(|c| c.is_active()).cloned().collect())
        }

        async fn find_active_for_farm(&self, farm_id: Uuid) -> DomainResult<Vec<Case>> {
            self.guard()?;
            let mut cases: Vec<Case> = self
                .cases
                .iter()
                .filter(|c| c.farm_id == farm_id && c.is_active())
                .cloned()
                .collect();
            cases.sort_by(|a, b| b.effective_assigned_at().cmp(&a.effective_assigned_at()));
            Ok(cases)
        }

        async fn find_assigned_for_consultant(
            &self,
            consultant_id: Uuid,
        ) -> DomainResult<Vec<Case>> {
            self.guard()?;
            let mut cases: Vec<Case> = self
                .cases
                .iter()
                .filter(|c| c.consultant_id == consultant_id && c.status == CaseStatus::Assigned)
                .cloned()
                .collect();
            cases.sort_by(|a, b| b.effective_assigned_at().cmp(&a.effective_assigned_at()));
            Ok(cases)
        }

        async fn create(&self, _new_case: &NewCase) -> DomainResult<Case> {
            unimplemented!("not used by query layer tests")
        }

        async fn update(&self, _id: Uuid, _update: &UpdateCase) -> DomainResult<Case> {
            unimplemented!("not used by query layer tests")
        }

        async fn delete(&self, _id: Uuid) -> DomainResult<()> {
            unimplemented!("not used by query layer tests")
        }
    }

    fn make_case(farm_id: Uuid, status: CaseStatus, assigned_offset_hours: Option<i64>) -> Case {
        let now = Utc::now();
        Case {
            id: Uuid::new_v4(),
            farm_id,
            consultant_id: Uuid::new_v4(),
            assigned_by_id: Uuid::new_v4(),
            status,
            priority: "Medium".to_string(),
            notes: String::new(),
            created_at: now - Duration::days(1),
            assigned_at: assigned_offset_hours.map(|h| now - Duration::hours(h)),
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn storage_failures_degrade_to_empty_results() {
        let queries = CaseQueries::new(StubCaseRepository::failing());
        let farm_id = Uuid::new_v4();

        assert!(queries.active_cases().await.is_empty());
        assert!(!queries.farm_has_active_case(farm_id).await);
        assert!(queries.active_case_for_farm(farm_id).await.is_none());
        assert!(queries
            .assigned_cases_for_consultant(Uuid::new_v4())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn completed_cases_do_not_count_as_active() {
        let farm_id = Uuid::new_v4();
        let queries = CaseQueries::new(StubCaseRepository::serving(vec![make_case(
            farm_id,
            CaseStatus::Completed,
            Some(1),
        )]));

        assert!(!queries.farm_has_active_case(farm_id).await);
        assert!(queries.active_case_for_farm(farm_id).await.is_none());
    }

    #[tokio::test]
    async fn duplicate_active_cases_yield_the_latest_assigned() {
        let farm_id = Uuid::new_v4();
        let older = make_case(farm_id, CaseStatus::Assigned, Some(10));
        let newer = make_case(farm_id, CaseStatus::InProgress, Some(1));
        let queries =
            CaseQueries::new(StubCaseRepository::serving(vec![older, newer.clone()]));

        let found = queries.active_case_for_farm(farm_id).await;
        assert_eq!(found.map(|c| c.id), Some(newer.id));
    }
}
