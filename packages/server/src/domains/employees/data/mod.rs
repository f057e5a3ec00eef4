pub mod employee;

pub use employee::{EmployeeData, EmployeePatch, NewEmployeeInput};
