use chrono::NaiveDate;
use sqlx::PgPool;

use crate::common::{EmployeeId, StoreResult};
use crate::domains::assignments::boundary::BoundaryPolicy;

/// Assignment model - one stint of an employee in a department (`dept_emp`)
///
/// `from_date <= to_date` is expected but not enforced by the schema.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    #[sqlx(rename = "emp_no")]
    pub employee_id: EmployeeId,
    #[sqlx(rename = "dept_no")]
    pub department_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Assignment {
    pub fn contains(&self, date: NaiveDate, policy: BoundaryPolicy) -> bool {
        policy.contains(self.from_date, self.to_date, date)
    }

    /// Find every assignment for the department with this name
    ///
    /// Date filtering is left to the caller so the boundary policy lives in
    /// one place.
    pub async fn find_for_department(department_name: &str, pool: &PgPool) -> StoreResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT de.emp_no, de.dept_no, de.from_date, de.to_date
             FROM dept_emp de
             JOIN departments d ON d.dept_no = de.dept_no
             WHERE d.dept_name = $1",
        )
        .bind(department_name)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new assignment
    pub async fn insert(&self, pool: &PgPool) -> StoreResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO dept_emp (emp_no, dept_no, from_date, to_date)
             VALUES ($1, $2, $3, $4)
             RETURNING emp_no, dept_no, from_date, to_date",
        )
        .bind(self.employee_id)
        .bind(&self.department_id)
        .bind(self.from_date)
        .bind(self.to_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Count assignments
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dept_emp")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
