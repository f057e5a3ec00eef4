use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::EmployeeId;
use crate::domains::salaries::actions::AverageSalary;
use crate::domains::salaries::models::salary::Salary as SalaryModel;

/// Pay period JSON type (fixtures)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryData {
    pub employee_id: EmployeeId,
    pub amount: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl From<SalaryData> for SalaryModel {
    fn from(data: SalaryData) -> Self {
        Self {
            employee_id: data.employee_id,
            amount: data.amount,
            from_date: data.from_date,
            to_date: data.to_date,
        }
    }
}

/// Response body for a department's average salary on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageSalaryData {
    pub department: String,
    pub date: NaiveDate,
    pub average_salary: f64,
    /// Members whose pay was counted
    pub employee_count: usize,
}

impl From<AverageSalary> for AverageSalaryData {
    fn from(average: AverageSalary) -> Self {
        Self {
            department: average.department,
            date: average.date,
            average_salary: average.average,
            employee_count: average.employee_count,
        }
    }
}
