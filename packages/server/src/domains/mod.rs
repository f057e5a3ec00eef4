// Business domains
pub mod assignments;
pub mod departments;
pub mod employees;
pub mod salaries;
