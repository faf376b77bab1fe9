pub mod repository;
pub mod types;

pub use repository::{AddressRepository, SqliteAddressRepository};
pub use types::{Address, NewAddress, UpdateAddress};
