use chrono::NaiveDate;
use sqlx::PgPool;

use crate::common::{EmployeeId, StoreError, StoreResult};
use crate::domains::assignments::BoundaryPolicy;

/// Salary model - one pay period of an employee (`salaries`)
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Salary {
    #[sqlx(rename = "emp_no")]
    pub employee_id: EmployeeId,
    #[sqlx(rename = "salary")]
    pub amount: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Salary {
    pub fn contains(&self, date: NaiveDate, policy: BoundaryPolicy) -> bool {
        policy.contains(self.from_date, self.to_date, date)
    }

    /// Mirrors the `salary >= 0` check on the table.
    pub fn check_amount(&self) -> StoreResult<()> {
        if self.amount < 0 {
            return Err(StoreError::ConstraintViolation(format!(
                "salary must not be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Every pay period of the given employees, in no particular order
    pub async fn find_for_employees(
        employee_ids: &[EmployeeId],
        pool: &PgPool,
    ) -> StoreResult<Vec<Self>> {
        let raw_ids: Vec<i32> = employee_ids.iter().map(|id| id.into_inner()).collect();
        sqlx::query_as::<_, Self>(
            "SELECT emp_no, salary, from_date, to_date
             FROM salaries
             WHERE emp_no = ANY($1)",
        )
        .bind(raw_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new pay period
    pub async fn insert(&self, pool: &PgPool) -> StoreResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO salaries (emp_no, salary, from_date, to_date)
             VALUES ($1, $2, $3, $4)
             RETURNING emp_no, salary, from_date, to_date",
        )
        .bind(self.employee_id)
        .bind(self.amount)
        .bind(self.from_date)
        .bind(self.to_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Count pay periods
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM salaries")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
