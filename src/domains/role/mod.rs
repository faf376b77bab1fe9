pub mod repository;
pub mod types;

pub use repository::{RoleRepository, SqliteRoleRepository};
pub use types::{Role, RoleKind};
