pub mod salary;

pub use salary::Salary;
