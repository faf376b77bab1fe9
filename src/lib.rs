use std::sync::Arc;

// Public modules
pub mod database;
pub mod domains;
pub mod errors;
pub mod validation;

// Private modules
mod db_migration;

pub use domains::assignment::{
    AssignCaseRequest, AssignmentContext, AssignmentService, AssignmentServiceImpl,
    ConsultantNotification, FarmAssignmentOverview, SaveFarmRequest, UpdateCaseRequest,
};
pub use domains::core::busy_coordinator::{BusyCoordinator, BusyScope};

use domains::address::repository::SqliteAddressRepository;
use domains::case::repository::SqliteCaseRepository;
use domains::farm::repository::SqliteFarmRepository;
use domains::person::repository::SqlitePersonRepository;
use domains::role::repository::SqliteRoleRepository;
use errors::ServiceResult;
use sqlx::SqlitePool;

/// Wired-up core: the database pool, the assignment service and the busy
/// coordinator shared with the presentation layer.
pub struct NatureCheckCore {
    pool: SqlitePool,
    pub assignment_service: Arc<dyn AssignmentService>,
    pub busy_coordinator: Arc<BusyCoordinator>,
}

impl NatureCheckCore {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Open the database at `db_url`, run pending migrations and wire the
/// SQLite-backed services. Call once at startup.
pub async fn initialize(db_url: &str) -> ServiceResult<NatureCheckCore> {
    let pool = database::init_pool(db_url).await?;
    db_migration::run_migrations(&pool).await?;

    let assignment_service = Arc::new(AssignmentServiceImpl::new(
        Arc::new(SqliteFarmRepository::new(pool.clone())),
        Arc::new(SqlitePersonRepository::new(pool.clone())),
        Arc::new(SqliteAddressRepository::new(pool.clone())),
        Arc::new(SqliteRoleRepository::new(pool.clone())),
        Arc::new(SqliteCaseRepository::new(pool.clone())),
    ));

    Ok(NatureCheckCore {
        pool,
        assignment_service,
        busy_coordinator: BusyCoordinator::new(),
    })
}
