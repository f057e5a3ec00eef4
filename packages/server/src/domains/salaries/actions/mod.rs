//! Salary actions
//!
//! The average is taken over the department's members on the date, found by
//! the membership query, so both joins share one boundary policy.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::common::{parse_date, EmployeeId, PersonnelError, PersonnelResult};
use crate::domains::assignments::BoundaryPolicy;
use crate::domains::salaries::models::Salary;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, PartialEq)]
pub struct AverageSalary {
    pub department: String,
    pub date: NaiveDate,
    pub average: f64,
    pub employee_count: usize,
}

/// Parses `raw_date` as `YYYY-MM-DD`, then averages the department's pay on it.
pub async fn average_salary_on(
    department_name: &str,
    raw_date: &str,
    deps: &ServerDeps,
) -> PersonnelResult<AverageSalary> {
    let date = parse_date(raw_date)?;
    average_salary_on_date(department_name, date, deps).await
}

/// Mean salary of the employees in `department_name` on `date`
///
/// Each member counts once, at the pay period in force that day. Members with
/// no pay period covering the date are left out of the mean.
///
/// # Errors
/// - `DepartmentNotFound` / `NoEmployeesFound` from the membership query.
/// - `NoSalariesFound` when no member has a salary on the date.
pub async fn average_salary_on_date(
    department_name: &str,
    date: NaiveDate,
    deps: &ServerDeps,
) -> PersonnelResult<AverageSalary> {
    let member_ids = deps
        .membership
        .member_ids_in_department_on_date(department_name, date)
        .await?;

    let salaries = deps.salaries.find_for_employees(&member_ids).await?;
    let pay = pay_on(&salaries, date, deps.membership.boundary_policy());

    if pay.is_empty() {
        return Err(PersonnelError::NoSalariesFound {
            department: department_name.to_string(),
            date,
        });
    }

    let total: i64 = pay.values().map(|amount| i64::from(*amount)).sum();
    let average = total as f64 / pay.len() as f64;

    info!(
        department = department_name,
        %date,
        members = member_ids.len(),
        paid = pay.len(),
        average,
        "Computed average salary"
    );

    Ok(AverageSalary {
        department: department_name.to_string(),
        date,
        average,
        employee_count: pay.len(),
    })
}

/// Salary in force on `date` per employee.
///
/// Back-to-back periods share their boundary day under the closed policy; the
/// later period wins there.
pub(crate) fn pay_on(
    salaries: &[Salary],
    date: NaiveDate,
    policy: BoundaryPolicy,
) -> BTreeMap<EmployeeId, i32> {
    let mut current: BTreeMap<EmployeeId, &Salary> = BTreeMap::new();
    for salary in salaries.iter().filter(|s| s.contains(date, policy)) {
        current
            .entry(salary.employee_id)
            .and_modify(|held| {
                if salary.from_date > held.from_date {
                    *held = salary;
                }
            })
            .or_insert(salary);
    }
    current
        .into_iter()
        .map(|(id, salary)| (id, salary.amount))
        .collect()
}
