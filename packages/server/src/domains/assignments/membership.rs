//! Membership query: which employees belonged to a department on a given date.
//!
//! The engine only reads. Every call goes back to the stores; nothing is cached
//! between calls.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, Instrument, Span};

use crate::common::{parse_date, EmployeeId, PersonnelError, PersonnelResult};
use crate::domains::assignments::boundary::BoundaryPolicy;
use crate::domains::assignments::models::Assignment;
use crate::domains::employees::models::Employee;
use crate::kernel::{BaseAssignmentStore, BaseDepartmentStore, BaseEmployeeStore};

#[derive(Clone)]
pub struct MembershipQueryEngine {
    employees: Arc<dyn BaseEmployeeStore>,
    departments: Arc<dyn BaseDepartmentStore>,
    assignments: Arc<dyn BaseAssignmentStore>,
    policy: BoundaryPolicy,
    span: Span,
}

impl MembershipQueryEngine {
    pub fn new(
        employees: Arc<dyn BaseEmployeeStore>,
        departments: Arc<dyn BaseDepartmentStore>,
        assignments: Arc<dyn BaseAssignmentStore>,
        span: Span,
    ) -> Self {
        Self {
            employees,
            departments,
            assignments,
            policy: BoundaryPolicy::default(),
            span,
        }
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Parses `raw_date` as `YYYY-MM-DD`, then runs the membership query.
    pub async fn find_employees_in_department_on(
        &self,
        department_name: &str,
        raw_date: &str,
    ) -> PersonnelResult<Vec<Employee>> {
        let date = parse_date(raw_date)?;
        self.find_employees_in_department_on_date(department_name, date)
            .await
    }

    /// Employees with at least one assignment to `department_name` whose
    /// interval contains `date`, ordered by emp_no, without duplicates.
    ///
    /// # Errors
    /// - `DepartmentNotFound` when no department has this name.
    /// - `NoEmployeesFound` when the department exists but nobody matches.
    pub async fn find_employees_in_department_on_date(
        &self,
        department_name: &str,
        date: NaiveDate,
    ) -> PersonnelResult<Vec<Employee>> {
        self.run(department_name, date)
            .instrument(self.span.clone())
            .await
    }

    /// Distinct ids of the employees in `department_name` on `date`, ascending.
    ///
    /// Same errors as [`Self::find_employees_in_department_on_date`], without
    /// reading the employee records.
    pub async fn member_ids_in_department_on_date(
        &self,
        department_name: &str,
        date: NaiveDate,
    ) -> PersonnelResult<Vec<EmployeeId>> {
        async {
            let mut member_ids = self.matching_ids(department_name, date).await?;
            member_ids.sort_unstable();
            member_ids.dedup();
            if member_ids.is_empty() {
                return Err(PersonnelError::NoEmployeesFound {
                    department: department_name.to_string(),
                    date,
                });
            }
            Ok(member_ids)
        }
        .instrument(self.span.clone())
        .await
    }

    async fn run(&self, department_name: &str, date: NaiveDate) -> PersonnelResult<Vec<Employee>> {
        let member_ids = self.matching_ids(department_name, date).await?;

        let members = retain_members(self.employees.list_all().await?, &member_ids);
        if members.is_empty() {
            return Err(PersonnelError::NoEmployeesFound {
                department: department_name.to_string(),
                date,
            });
        }

        info!(
            department = department_name,
            %date,
            count = members.len(),
            "Found employees in department"
        );
        Ok(members)
    }

    /// Validates the department, then filters its intervals by `date`.
    async fn matching_ids(
        &self,
        department_name: &str,
        date: NaiveDate,
    ) -> PersonnelResult<Vec<EmployeeId>> {
        if self.departments.find_by_name(department_name).await?.is_none() {
            info!(department = department_name, "Department not found");
            return Err(PersonnelError::DepartmentNotFound(department_name.to_string()));
        }

        let intervals = self.assignments.find_for_department(department_name).await?;
        let member_ids = member_ids_on(&intervals, date, self.policy);
        debug!(
            department = department_name,
            %date,
            policy = %self.policy,
            intervals = intervals.len(),
            matching = member_ids.len(),
            "Filtered assignment intervals"
        );
        Ok(member_ids)
    }
}

/// Employee ids of every interval containing `date`.
///
/// Overlapping intervals for the same employee yield the id more than once;
/// callers must not treat the result as a set.
pub(crate) fn member_ids_on(
    intervals: &[Assignment],
    date: NaiveDate,
    policy: BoundaryPolicy,
) -> Vec<EmployeeId> {
    intervals
        .iter()
        .filter(|interval| interval.contains(date, policy))
        .map(|interval| interval.employee_id)
        .collect()
}

/// Keeps the employees whose id is in `member_ids`, in `employees` order.
pub(crate) fn retain_members(employees: Vec<Employee>, member_ids: &[EmployeeId]) -> Vec<Employee> {
    let wanted: HashSet<EmployeeId> = member_ids.iter().copied().collect();
    employees
        .into_iter()
        .filter(|employee| wanted.contains(&employee.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::departments::models::Department;
    use crate::domains::employees::models::Gender;
    use crate::kernel::InMemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i32) -> Employee {
        Employee {
            id: EmployeeId::from_raw(id),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            gender: Gender::Male,
            birth_date: date(1960, 1, 1),
            hire_date: date(1990, 1, 1),
        }
    }

    fn interval(id: i32, from: NaiveDate, to: NaiveDate) -> Assignment {
        Assignment {
            employee_id: EmployeeId::from_raw(id),
            department_id: "d001".to_string(),
            from_date: from,
            to_date: to,
        }
    }

    async fn marketing_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        BaseDepartmentStore::insert(
            store.as_ref(),
            &Department {
                id: "d001".to_string(),
                name: "Marketing".to_string(),
            },
        )
        .await
        .unwrap();
        BaseEmployeeStore::insert(store.as_ref(), &employee(10001))
            .await
            .unwrap();
        BaseAssignmentStore::insert(
            store.as_ref(),
            &interval(10001, date(2000, 1, 1), date(2010, 1, 1)),
        )
        .await
        .unwrap();
        store
    }

    fn engine(store: Arc<InMemoryStore>) -> MembershipQueryEngine {
        MembershipQueryEngine::new(store.clone(), store.clone(), store, Span::none())
    }

    #[test]
    fn member_ids_keep_duplicates_from_overlapping_intervals() {
        let intervals = vec![
            interval(10001, date(2000, 1, 1), date(2010, 1, 1)),
            interval(10001, date(2005, 1, 1), date(2012, 1, 1)),
            interval(10002, date(2011, 1, 1), date(2012, 1, 1)),
        ];

        let ids = member_ids_on(&intervals, date(2006, 6, 6), BoundaryPolicy::Closed);
        assert_eq!(
            ids,
            vec![EmployeeId::from_raw(10001), EmployeeId::from_raw(10001)]
        );
    }

    #[test]
    fn retain_members_follows_enumeration_order_and_deduplicates() {
        let employees = vec![employee(10001), employee(10002), employee(10003)];
        let ids = vec![
            EmployeeId::from_raw(10003),
            EmployeeId::from_raw(10001),
            EmployeeId::from_raw(10003),
        ];

        let kept: Vec<i32> = retain_members(employees, &ids)
            .into_iter()
            .map(|e| e.id.into_inner())
            .collect();
        assert_eq!(kept, vec![10001, 10003]);
    }

    #[tokio::test]
    async fn finds_employee_inside_interval() {
        let engine = engine(marketing_store().await);

        let found = engine
            .find_employees_in_department_on_date("Marketing", date(2005, 10, 10))
            .await
            .unwrap();

        assert_eq!(found, vec![employee(10001)]);
    }

    #[tokio::test]
    async fn date_outside_interval_is_no_employees_found() {
        let engine = engine(marketing_store().await);

        let err = engine
            .find_employees_in_department_on_date("Marketing", date(2011, 1, 1))
            .await
            .unwrap_err();

        match err {
            PersonnelError::NoEmployeesFound { department, date: on } => {
                assert_eq!(department, "Marketing");
                assert_eq!(on, date(2011, 1, 1));
            }
            other => panic!("expected NoEmployeesFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_department_fails_before_reading_assignments() {
        let engine = engine(marketing_store().await);

        let err = engine
            .find_employees_in_department_on_date("Unicorn", date(2005, 10, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, PersonnelError::DepartmentNotFound(ref name) if name == "Unicorn"));
    }

    #[tokio::test]
    async fn malformed_date_is_invalid_date() {
        let engine = engine(marketing_store().await);

        let err = engine
            .find_employees_in_department_on("Marketing", "2020-13-40")
            .await
            .unwrap_err();

        assert!(matches!(err, PersonnelError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn closed_policy_matches_both_endpoints() {
        let engine = engine(marketing_store().await);

        for on in [date(2000, 1, 1), date(2010, 1, 1)] {
            let found = engine
                .find_employees_in_department_on_date("Marketing", on)
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "expected a match on {on}");
        }
    }

    #[tokio::test]
    async fn member_ids_are_distinct_and_checked_like_the_full_query() {
        let store = marketing_store().await;
        BaseAssignmentStore::insert(
            store.as_ref(),
            &interval(10001, date(2005, 1, 1), date(2012, 1, 1)),
        )
        .await
        .unwrap();
        let engine = engine(store);

        let ids = engine
            .member_ids_in_department_on_date("Marketing", date(2006, 6, 6))
            .await
            .unwrap();
        assert_eq!(ids, vec![EmployeeId::from_raw(10001)]);

        assert!(matches!(
            engine
                .member_ids_in_department_on_date("Unicorn", date(2006, 6, 6))
                .await,
            Err(PersonnelError::DepartmentNotFound(_))
        ));
        assert!(matches!(
            engine
                .member_ids_in_department_on_date("Marketing", date(2013, 1, 1))
                .await,
            Err(PersonnelError::NoEmployeesFound { .. })
        ));
    }

    #[tokio::test]
    async fn half_open_policy_drops_end_date() {
        let engine =
            engine(marketing_store().await).with_boundary_policy(BoundaryPolicy::HalfOpen);

        assert!(engine
            .find_employees_in_department_on_date("Marketing", date(2000, 1, 1))
            .await
            .is_ok());
        assert!(matches!(
            engine
                .find_employees_in_department_on_date("Marketing", date(2010, 1, 1))
                .await,
            Err(PersonnelError::NoEmployeesFound { .. })
        ));
    }
}
