pub mod address;
pub mod assignment;
pub mod case;
pub mod core;
pub mod farm;
pub mod person;
pub mod role;
