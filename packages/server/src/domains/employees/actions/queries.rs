//! Employee query actions
//!
//! Query actions return models directly; routes convert them to data types
//! and map errors to status codes.

use serde::Deserialize;
use tracing::info;

use crate::common::{EmployeeId, PersonnelError, PersonnelResult};
use crate::domains::employees::models::Employee;
use crate::kernel::ServerDeps;

/// Optional filters for listing employees.
///
/// Precedence: `last_name` wins outright; otherwise `department` and `date`
/// together run the membership query; otherwise everything is listed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub date: Option<String>,
}

/// Get one employee by emp_no
pub async fn get_employee(id: EmployeeId, deps: &ServerDeps) -> PersonnelResult<Employee> {
    info!(employee_id = %id, "Fetching employee");

    deps.employees
        .find_by_id(id)
        .await?
        .ok_or(PersonnelError::EmployeeNotFound(id))
}

/// List employees, narrowed by surname or by department membership on a date
pub async fn list_employees(
    filter: &EmployeeFilter,
    deps: &ServerDeps,
) -> PersonnelResult<Vec<Employee>> {
    if let Some(last_name) = filter.last_name.as_deref() {
        info!(last_name, "Fetching employees by last name");
        let employees = deps.employees.find_by_surname(last_name).await?;
        if employees.is_empty() {
            return Err(PersonnelError::SurnameNotFound(last_name.to_string()));
        }
        return Ok(employees);
    }

    if let (Some(department), Some(date)) = (filter.department.as_deref(), filter.date.as_deref())
    {
        info!(department, date, "Fetching employees by department and date");
        return deps
            .membership
            .find_employees_in_department_on(department, date)
            .await;
    }

    info!("Fetching all employees");
    Ok(deps.employees.list_all().await?)
}
