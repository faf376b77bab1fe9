pub mod busy_coordinator;
pub mod repository;
