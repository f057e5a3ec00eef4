//! Department domain - department lookup and creation

pub mod actions;
pub mod data;
pub mod models;

pub use data::DepartmentData;
pub use models::Department;
