pub mod queries;
pub mod repository;
pub mod types;

pub use queries::CaseQueries;
pub use repository::{CaseRepository, SqliteCaseRepository};
pub use types::{Case, CaseStatus, NewCase, UpdateCase};
