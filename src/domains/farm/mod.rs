pub mod repository;
pub mod types;

pub use repository::{FarmRepository, SqliteFarmRepository};
pub use types::{Farm, NewFarm, UpdateFarm};
