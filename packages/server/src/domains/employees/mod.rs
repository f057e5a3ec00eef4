//! Employee domain - employee records and their lookup / mutation actions
//!
//! Architecture:
//!   route → actions → ServerDeps stores

pub mod actions;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{EmployeeData, EmployeePatch, NewEmployeeInput};
pub use models::{Employee, Gender};
