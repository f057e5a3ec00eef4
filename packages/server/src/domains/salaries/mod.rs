//! Salary domain - pay history and the department average on a date
//!
//! Architecture:
//!   route → actions → ServerDeps.membership (who) + salary store (pay)

pub mod actions;
pub mod data;
pub mod models;

pub use data::{AverageSalaryData, SalaryData};
pub use models::Salary;
