//! Fixture loading for departments, employees, and assignment history.
//!
//! Works against any `ServerDeps`, so the same JSON file seeds Postgres (via
//! `seed_cli load`) or the in-memory backend at startup (`SEED_FILE`).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::common::{EmployeeId, StoreError};
use crate::domains::assignments::models::Assignment;
use crate::domains::departments::data::DepartmentData;
use crate::domains::departments::models::Department;
use crate::domains::employees::data::EmployeeData;
use crate::domains::employees::models::Employee;
use crate::domains::salaries::data::SalaryData;
use crate::domains::salaries::models::Salary;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub departments: Vec<DepartmentData>,
    #[serde(default)]
    pub employees: Vec<EmployeeData>,
    #[serde(default)]
    pub assignments: Vec<AssignmentInput>,
    #[serde(default)]
    pub salaries: Vec<SalaryData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub employee_id: EmployeeId,
    pub department_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Per-entity counts of rows written and rows skipped as already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub departments_created: usize,
    pub employees_created: usize,
    pub assignments_created: usize,
    pub salaries_created: usize,
    pub skipped: usize,
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }

    /// Writes every record, skipping ones that already exist.
    ///
    /// Departments are skipped by name, employees by emp_no, assignments and
    /// salaries when the store reports a duplicate key. Any other failure
    /// aborts the load.
    pub async fn load_into(&self, deps: &ServerDeps) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        for data in &self.departments {
            if deps.departments.find_by_name(&data.name).await?.is_some() {
                debug!(name = %data.name, "Department exists, skipping");
                summary.skipped += 1;
                continue;
            }
            let department = Department::from(data.clone());
            deps.departments
                .insert(&department)
                .await
                .with_context(|| format!("Failed to seed department {}", data.id))?;
            summary.departments_created += 1;
        }

        for data in &self.employees {
            if deps.employees.find_by_id(data.id).await?.is_some() {
                debug!(employee_id = %data.id, "Employee exists, skipping");
                summary.skipped += 1;
                continue;
            }
            let employee = Employee {
                id: data.id,
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
                gender: data.gender,
                birth_date: data.birth_date,
                hire_date: data.hire_date,
            };
            deps.employees
                .insert(&employee)
                .await
                .with_context(|| format!("Failed to seed employee {}", data.id))?;
            summary.employees_created += 1;
        }

        for input in &self.assignments {
            let assignment = Assignment {
                employee_id: input.employee_id,
                department_id: input.department_id.clone(),
                from_date: input.from_date,
                to_date: input.to_date,
            };
            match deps.assignments.insert(&assignment).await {
                Ok(_) => summary.assignments_created += 1,
                Err(StoreError::DuplicateKey(_)) => {
                    debug!(employee_id = %input.employee_id, "Assignment exists, skipping");
                    summary.skipped += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!(
                            "Failed to seed assignment of employee {} to {}",
                            input.employee_id, input.department_id
                        )
                    })
                }
            }
        }

        for data in &self.salaries {
            match deps.salaries.insert(&Salary::from(data.clone())).await {
                Ok(_) => summary.salaries_created += 1,
                Err(StoreError::DuplicateKey(_)) => {
                    debug!(employee_id = %data.employee_id, "Salary exists, skipping");
                    summary.skipped += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!(
                            "Failed to seed salary of employee {} from {}",
                            data.employee_id, data.from_date
                        )
                    })
                }
            }
        }

        info!(
            departments = summary.departments_created,
            employees = summary.employees_created,
            assignments = summary.assignments_created,
            salaries = summary.salaries_created,
            skipped = summary.skipped,
            "Seed data loaded"
        );
        Ok(summary)
    }
}
