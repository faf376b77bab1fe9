pub mod service;
pub mod types;

pub use service::{AssignmentService, AssignmentServiceImpl};
pub use types::{
    AssignCaseRequest, AssignmentContext, ConsultantNotification, FarmAssignmentOverview,
    SaveFarmRequest, UpdateCaseRequest,
};
