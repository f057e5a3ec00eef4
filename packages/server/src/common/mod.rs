// Common types and utilities shared across the application

pub mod dates;
pub mod entity_ids;
pub mod errors;
pub mod id;

pub use dates::parse_date;
pub use entity_ids::*;
pub use errors::{PersonnelError, PersonnelResult, StoreError, StoreResult};
pub use id::Id;
