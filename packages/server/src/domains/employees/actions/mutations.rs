//! Employee mutation actions
//!
//! Each action is a single store write; there is no locking across actions,
//! so a concurrent update and delete of the same employee is last-writer-wins
//! or surfaces as not found.

use tracing::{debug, info, warn};

use crate::common::{EmployeeId, PersonnelError, PersonnelResult, StoreError};
use crate::domains::employees::data::{EmployeePatch, NewEmployeeInput};
use crate::domains::employees::models::Employee;
use crate::kernel::ServerDeps;

/// Create an employee with a caller-supplied, unused emp_no
///
/// # Errors
/// - `Validation` listing every missing field.
/// - `EmployeeAlreadyExists` when the emp_no is taken.
/// - `ConstraintViolation` when the store rejects the record.
pub async fn create_employee(
    input: NewEmployeeInput,
    deps: &ServerDeps,
) -> PersonnelResult<Employee> {
    let employee = input.into_employee()?;

    if deps.employees.find_by_id(employee.id).await?.is_some() {
        info!(employee_id = %employee.id, "Employee already exists");
        return Err(PersonnelError::EmployeeAlreadyExists(employee.id));
    }

    info!(employee_id = %employee.id, "Creating employee");
    // A concurrent create can take the id between the check and the insert;
    // the table's primary key is the only unique constraint, so a duplicate
    // key here always means the id.
    let created = deps.employees.insert(&employee).await.map_err(|e| match e {
        StoreError::DuplicateKey(_) => {
            info!(employee_id = %employee.id, "Employee created concurrently");
            PersonnelError::EmployeeAlreadyExists(employee.id)
        }
        other => {
            warn!(employee_id = %employee.id, error = %other, "Failed to create employee");
            PersonnelError::from(other)
        }
    })?;

    Ok(created)
}

/// Overwrite only the fields present in `patch`
pub async fn update_employee(
    id: EmployeeId,
    patch: EmployeePatch,
    deps: &ServerDeps,
) -> PersonnelResult<Employee> {
    let mut employee = deps
        .employees
        .find_by_id(id)
        .await?
        .ok_or(PersonnelError::EmployeeNotFound(id))?;

    if patch.is_empty() {
        debug!(employee_id = %id, "Empty update, nothing to write");
        return Ok(employee);
    }

    patch.apply_to(&mut employee);

    info!(employee_id = %id, "Updating employee");
    deps.employees
        .update(&employee)
        .await
        .map_err(|e| {
            warn!(employee_id = %id, error = %e, "Failed to update employee");
            PersonnelError::from(e)
        })?
        .ok_or(PersonnelError::EmployeeNotFound(id))
}

/// Delete an employee and their assignment history
///
/// A store failure is returned as its own error kind, never folded into a
/// "not deleted" flag.
pub async fn delete_employee(id: EmployeeId, deps: &ServerDeps) -> PersonnelResult<()> {
    info!(employee_id = %id, "Deleting employee");

    let deleted = deps.employees.delete(id).await.map_err(|e| {
        warn!(employee_id = %id, error = %e, "Failed to delete employee");
        PersonnelError::from(e)
    })?;

    if !deleted {
        return Err(PersonnelError::EmployeeNotFound(id));
    }
    Ok(())
}
