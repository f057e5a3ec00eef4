//! In-memory store variant.
//!
//! Mirrors the Postgres schema's constraints (keys, foreign keys, column
//! limits, cascading deletes) so that both variants reject the same writes.
//! Used by tests and by `STORE_BACKEND=memory`.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::common::{EmployeeId, StoreError, StoreResult};
use crate::domains::assignments::models::Assignment;
use crate::domains::departments::models::Department;
use crate::domains::employees::models::Employee;
use crate::domains::salaries::models::Salary;
use crate::kernel::{BaseAssignmentStore, BaseDepartmentStore, BaseEmployeeStore, BaseSalaryStore};

#[derive(Default)]
pub struct InMemoryStore {
    employees: RwLock<BTreeMap<EmployeeId, Employee>>,
    /// Keyed by dept_no
    departments: RwLock<BTreeMap<String, Department>>,
    assignments: RwLock<Vec<Assignment>>,
    salaries: RwLock<Vec<Salary>>,
}

// Every operation leaves the maps consistent before it can panic, so a
// poisoned lock still guards valid data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assignment_count(&self) -> usize {
        read(&self.assignments).len()
    }
}

#[async_trait]
impl BaseEmployeeStore for InMemoryStore {
    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        Ok(read(&self.employees).get(&id).cloned())
    }

    async fn find_by_surname(&self, surname: &str) -> StoreResult<Vec<Employee>> {
        Ok(read(&self.employees)
            .values()
            .filter(|employee| employee.last_name == surname)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(read(&self.employees).values().cloned().collect())
    }

    async fn insert(&self, employee: &Employee) -> StoreResult<Employee> {
        employee.check_column_limits()?;

        let mut employees = write(&self.employees);
        if employees.contains_key(&employee.id) {
            return Err(StoreError::DuplicateKey(format!(
                "employee {} already exists",
                employee.id
            )));
        }
        employees.insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    async fn update(&self, employee: &Employee) -> StoreResult<Option<Employee>> {
        employee.check_column_limits()?;

        let mut employees = write(&self.employees);
        Ok(employees.get_mut(&employee.id).map(|stored| {
            *stored = employee.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: EmployeeId) -> StoreResult<bool> {
        let removed = write(&self.employees).remove(&id).is_some();
        if removed {
            write(&self.assignments).retain(|assignment| assignment.employee_id != id);
            write(&self.salaries).retain(|salary| salary.employee_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl BaseDepartmentStore for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Department>> {
        Ok(read(&self.departments)
            .values()
            .find(|department| department.name == name)
            .cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Department>> {
        Ok(read(&self.departments).values().cloned().collect())
    }

    async fn insert(&self, department: &Department) -> StoreResult<Department> {
        department.check_column_limits()?;

        let mut departments = write(&self.departments);
        if departments.contains_key(&department.id) {
            return Err(StoreError::DuplicateKey(format!(
                "department {} already exists",
                department.id
            )));
        }
        if departments.values().any(|existing| existing.name == department.name) {
            return Err(StoreError::DuplicateKey(format!(
                "department name {} already exists",
                department.name
            )));
        }
        departments.insert(department.id.clone(), department.clone());
        Ok(department.clone())
    }
}

#[async_trait]
impl BaseAssignmentStore for InMemoryStore {
    async fn find_for_department(&self, department_name: &str) -> StoreResult<Vec<Assignment>> {
        let department_id = match read(&self.departments)
            .values()
            .find(|department| department.name == department_name)
        {
            Some(department) => department.id.clone(),
            None => return Ok(Vec::new()),
        };

        Ok(read(&self.assignments)
            .iter()
            .filter(|assignment| assignment.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, assignment: &Assignment) -> StoreResult<Assignment> {
        if !read(&self.employees).contains_key(&assignment.employee_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "foreign key: employee {} does not exist",
                assignment.employee_id
            )));
        }
        if !read(&self.departments).contains_key(&assignment.department_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "foreign key: department {} does not exist",
                assignment.department_id
            )));
        }

        let mut assignments = write(&self.assignments);
        let duplicate = assignments.iter().any(|existing| {
            existing.employee_id == assignment.employee_id
                && existing.department_id == assignment.department_id
                && existing.from_date == assignment.from_date
        });
        if duplicate {
            return Err(StoreError::DuplicateKey(format!(
                "employee {} already starts in {} on {}",
                assignment.employee_id, assignment.department_id, assignment.from_date
            )));
        }
        assignments.push(assignment.clone());
        Ok(assignment.clone())
    }
}

#[async_trait]
impl BaseSalaryStore for InMemoryStore {
    async fn find_for_employees(&self, employee_ids: &[EmployeeId]) -> StoreResult<Vec<Salary>> {
        Ok(read(&self.salaries)
            .iter()
            .filter(|salary| employee_ids.contains(&salary.employee_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, salary: &Salary) -> StoreResult<Salary> {
        salary.check_amount()?;
        if !read(&self.employees).contains_key(&salary.employee_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "foreign key: employee {} does not exist",
                salary.employee_id
            )));
        }

        let mut salaries = write(&self.salaries);
        let duplicate = salaries.iter().any(|existing| {
            existing.employee_id == salary.employee_id && existing.from_date == salary.from_date
        });
        if duplicate {
            return Err(StoreError::DuplicateKey(format!(
                "employee {} already has a salary from {}",
                salary.employee_id, salary.from_date
            )));
        }
        salaries.push(salary.clone());
        Ok(salary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::employees::models::Gender;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i32, last_name: &str) -> Employee {
        Employee {
            id: EmployeeId::from_raw(id),
            first_name: "Test".to_string(),
            last_name: last_name.to_string(),
            gender: Gender::Female,
            birth_date: date(1960, 1, 1),
            hire_date: date(1990, 1, 1),
        }
    }

    fn marketing() -> Department {
        Department {
            id: "d001".to_string(),
            name: "Marketing".to_string(),
        }
    }

    #[tokio::test]
    async fn list_all_is_ordered_by_id() {
        let store = InMemoryStore::new();
        for id in [10003, 10001, 10002] {
            BaseEmployeeStore::insert(&store, &employee(id, "Facello"))
                .await
                .unwrap();
        }

        let ids: Vec<i32> = BaseEmployeeStore::list_all(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id.into_inner())
            .collect();
        assert_eq!(ids, vec![10001, 10002, 10003]);
    }

    #[tokio::test]
    async fn duplicate_employee_is_a_duplicate_key() {
        let store = InMemoryStore::new();
        BaseEmployeeStore::insert(&store, &employee(10001, "Facello"))
            .await
            .unwrap();

        let err = BaseEmployeeStore::insert(&store, &employee(10001, "Simmel"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn update_of_missing_employee_returns_none() {
        let store = InMemoryStore::new();
        let updated = store.update(&employee(10001, "Facello")).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_assignments() {
        let store = InMemoryStore::new();
        BaseEmployeeStore::insert(&store, &employee(10001, "Facello"))
            .await
            .unwrap();
        BaseDepartmentStore::insert(&store, &marketing()).await.unwrap();
        BaseAssignmentStore::insert(
            &store,
            &Assignment {
                employee_id: EmployeeId::from_raw(10001),
                department_id: "d001".to_string(),
                from_date: date(2000, 1, 1),
                to_date: date(2010, 1, 1),
            },
        )
        .await
        .unwrap();

        assert!(store.delete(EmployeeId::from_raw(10001)).await.unwrap());
        assert_eq!(store.assignment_count(), 0);
        assert!(!store.delete(EmployeeId::from_raw(10001)).await.unwrap());
    }

    #[tokio::test]
    async fn assignment_requires_known_employee_and_department() {
        let store = InMemoryStore::new();
        BaseDepartmentStore::insert(&store, &marketing()).await.unwrap();

        let err = BaseAssignmentStore::insert(
            &store,
            &Assignment {
                employee_id: EmployeeId::from_raw(424242),
                department_id: "d001".to_string(),
                from_date: date(2000, 1, 1),
                to_date: date(2010, 1, 1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(ref m) if m.contains("424242")));
    }

    #[tokio::test]
    async fn department_names_are_unique() {
        let store = InMemoryStore::new();
        BaseDepartmentStore::insert(&store, &marketing()).await.unwrap();

        let err = BaseDepartmentStore::insert(
            &store,
            &Department {
                id: "d009".to_string(),
                name: "Marketing".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn assignments_for_unknown_department_are_empty() {
        let store = InMemoryStore::new();
        assert!(store.find_for_department("Unicorn").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn salaries_follow_employee_lifecycle() {
        let store = InMemoryStore::new();
        BaseEmployeeStore::insert(&store, &employee(10001, "Facello"))
            .await
            .unwrap();
        let salary = Salary {
            employee_id: EmployeeId::from_raw(10001),
            amount: 60000,
            from_date: date(2000, 1, 1),
            to_date: date(2010, 1, 1),
        };
        BaseSalaryStore::insert(&store, &salary).await.unwrap();

        let duplicate = BaseSalaryStore::insert(&store, &salary).await.unwrap_err();
        assert!(matches!(duplicate, StoreError::DuplicateKey(_)));

        let orphan = BaseSalaryStore::insert(
            &store,
            &Salary {
                employee_id: EmployeeId::from_raw(424242),
                ..salary.clone()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(orphan, StoreError::ConstraintViolation(_)));

        let ids = [EmployeeId::from_raw(10001)];
        assert_eq!(store.find_for_employees(&ids).await.unwrap(), vec![salary]);

        BaseEmployeeStore::delete(&store, EmployeeId::from_raw(10001))
            .await
            .unwrap();
        assert!(store.find_for_employees(&ids).await.unwrap().is_empty());
    }
}
