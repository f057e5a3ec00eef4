//! Postgres-backed store variant.
//!
//! Thin adapter from the store traits onto the model methods, which own the SQL.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{Instrument, Span};

use crate::common::{EmployeeId, StoreResult};
use crate::domains::assignments::models::Assignment;
use crate::domains::departments::models::Department;
use crate::domains::employees::models::Employee;
use crate::domains::salaries::models::Salary;
use crate::kernel::{BaseAssignmentStore, BaseDepartmentStore, BaseEmployeeStore, BaseSalaryStore};

/// Implements every store trait over one connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
    span: Span,
}

impl PostgresStore {
    pub fn new(pool: PgPool, span: Span) -> Self {
        Self { pool, span }
    }
}

#[async_trait]
impl BaseEmployeeStore for PostgresStore {
    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        Employee::find_by_id(id, &self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn find_by_surname(&self, surname: &str) -> StoreResult<Vec<Employee>> {
        Employee::find_by_last_name(surname, &self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        Employee::find_all(&self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn insert(&self, employee: &Employee) -> StoreResult<Employee> {
        employee
            .insert(&self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn update(&self, employee: &Employee) -> StoreResult<Option<Employee>> {
        employee
            .update(&self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn delete(&self, id: EmployeeId) -> StoreResult<bool> {
        Employee::delete(id, &self.pool)
            .instrument(self.span.clone())
            .await
    }
}

#[async_trait]
impl BaseDepartmentStore for PostgresStore {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Department>> {
        Department::find_by_name(name, &self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn list_all(&self) -> StoreResult<Vec<Department>> {
        Department::find_all(&self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn insert(&self, department: &Department) -> StoreResult<Department> {
        department
            .insert(&self.pool)
            .instrument(self.span.clone())
            .await
    }
}

#[async_trait]
impl BaseAssignmentStore for PostgresStore {
    async fn find_for_department(&self, department_name: &str) -> StoreResult<Vec<Assignment>> {
        Assignment::find_for_department(department_name, &self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn insert(&self, assignment: &Assignment) -> StoreResult<Assignment> {
        assignment
            .insert(&self.pool)
            .instrument(self.span.clone())
            .await
    }
}

#[async_trait]
impl BaseSalaryStore for PostgresStore {
    async fn find_for_employees(&self, employee_ids: &[EmployeeId]) -> StoreResult<Vec<Salary>> {
        Salary::find_for_employees(employee_ids, &self.pool)
            .instrument(self.span.clone())
            .await
    }

    async fn insert(&self, salary: &Salary) -> StoreResult<Salary> {
        salary
            .insert(&self.pool)
            .instrument(self.span.clone())
            .await
    }
}
