pub mod salary;

pub use salary::{AverageSalaryData, SalaryData};
