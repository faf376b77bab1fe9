pub mod repository;
pub mod types;

pub use repository::{PersonRepository, SqlitePersonRepository};
pub use types::{NewPerson, Person, UpdatePerson};
