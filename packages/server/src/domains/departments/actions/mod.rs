//! Department actions

use tracing::info;

use crate::common::{PersonnelError, PersonnelResult};
use crate::domains::departments::models::Department;
use crate::kernel::ServerDeps;

/// List every department, ordered by dept_no
pub async fn list_departments(deps: &ServerDeps) -> PersonnelResult<Vec<Department>> {
    Ok(deps.departments.list_all().await?)
}

/// Create a department whose name is not yet in use
pub async fn create_department(
    department: Department,
    deps: &ServerDeps,
) -> PersonnelResult<Department> {
    if deps
        .departments
        .find_by_name(&department.name)
        .await?
        .is_some()
    {
        return Err(PersonnelError::DepartmentNameTaken(department.name));
    }

    info!(dept_no = %department.id, name = %department.name, "Creating department");
    Ok(deps.departments.insert(&department).await?)
}
