// Trait definitions for dependency injection
//
// These are STORE traits only - no business logic.
// Business logic (the membership query, partial updates) lives in domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmployeeStore)

use async_trait::async_trait;

use crate::common::{EmployeeId, StoreResult};
use crate::domains::assignments::models::Assignment;
use crate::domains::departments::models::Department;
use crate::domains::employees::models::Employee;
use crate::domains::salaries::models::Salary;

// =============================================================================
// Employee Store Trait
// =============================================================================

#[async_trait]
pub trait BaseEmployeeStore: Send + Sync {
    /// Point lookup by emp_no
    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    /// Exact surname match, ordered by emp_no (possibly empty)
    async fn find_by_surname(&self, surname: &str) -> StoreResult<Vec<Employee>>;

    /// Every employee, ordered by emp_no
    async fn list_all(&self) -> StoreResult<Vec<Employee>>;

    /// Insert a new employee; the caller has already checked the id is unused
    async fn insert(&self, employee: &Employee) -> StoreResult<Employee>;

    /// Overwrite an existing employee; None if the row vanished
    async fn update(&self, employee: &Employee) -> StoreResult<Option<Employee>>;

    /// Delete by emp_no (assignments go with it); false if nothing was deleted
    async fn delete(&self, id: EmployeeId) -> StoreResult<bool>;
}

// =============================================================================
// Department Store Trait
// =============================================================================

#[async_trait]
pub trait BaseDepartmentStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Department>>;

    /// Every department, ordered by dept_no
    async fn list_all(&self) -> StoreResult<Vec<Department>>;

    /// Insert a new department; duplicate code or name is a constraint violation
    async fn insert(&self, department: &Department) -> StoreResult<Department>;
}

// =============================================================================
// Assignment Store Trait
// =============================================================================

#[async_trait]
pub trait BaseAssignmentStore: Send + Sync {
    /// All assignment intervals for the department with this name, any order
    async fn find_for_department(&self, department_name: &str) -> StoreResult<Vec<Assignment>>;

    /// Insert a new assignment; unknown employee or department is a constraint violation
    async fn insert(&self, assignment: &Assignment) -> StoreResult<Assignment>;
}

// =============================================================================
// Salary Store Trait
// =============================================================================

#[async_trait]
pub trait BaseSalaryStore: Send + Sync {
    /// Every pay period of the given employees, any order
    async fn find_for_employees(&self, employee_ids: &[EmployeeId]) -> StoreResult<Vec<Salary>>;

    /// Insert a new pay period; unknown employee is a constraint violation
    async fn insert(&self, salary: &Salary) -> StoreResult<Salary>;
}
