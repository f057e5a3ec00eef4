use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EmployeeId, StoreError, StoreResult};

/// Column limits from `employees` (`VARCHAR(14)` / `VARCHAR(16)`).
pub const FIRST_NAME_MAX_CHARS: usize = 14;
pub const LAST_NAME_MAX_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employee_gender")]
pub enum Gender {
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Male,
    #[serde(rename = "F")]
    #[sqlx(rename = "F")]
    Female,
}

/// Employee model - SQL persistence layer
///
/// `id` is the externally assigned `emp_no`; it never changes after insert.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    #[sqlx(rename = "emp_no")]
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
}

impl Employee {
    /// Checks the column limits the `employees` table enforces.
    ///
    /// Stores without a schema (the in-memory variant) call this so both
    /// backends reject the same records.
    pub fn check_column_limits(&self) -> StoreResult<()> {
        if self.first_name.chars().count() > FIRST_NAME_MAX_CHARS {
            return Err(StoreError::ConstraintViolation(format!(
                "first_name exceeds {FIRST_NAME_MAX_CHARS} characters"
            )));
        }
        if self.last_name.chars().count() > LAST_NAME_MAX_CHARS {
            return Err(StoreError::ConstraintViolation(format!(
                "last_name exceeds {LAST_NAME_MAX_CHARS} characters"
            )));
        }
        Ok(())
    }

    /// Find employee by emp_no
    pub async fn find_by_id(id: EmployeeId, pool: &PgPool) -> StoreResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE emp_no = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find employees by exact last name, ordered by emp_no
    pub async fn find_by_last_name(last_name: &str, pool: &PgPool) -> StoreResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE last_name = $1 ORDER BY emp_no")
            .bind(last_name)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all employees, ordered by emp_no
    pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees ORDER BY emp_no")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new employee
    pub async fn insert(&self, pool: &PgPool) -> StoreResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO employees (
                emp_no,
                birth_date,
                first_name,
                last_name,
                gender,
                hire_date
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.birth_date)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(self.gender)
        .bind(self.hire_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Overwrite every mutable column of an existing employee
    ///
    /// Returns None if the row no longer exists.
    pub async fn update(&self, pool: &PgPool) -> StoreResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE employees
             SET birth_date = $2,
                 first_name = $3,
                 last_name = $4,
                 gender = $5,
                 hire_date = $6
             WHERE emp_no = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.birth_date)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(self.gender)
        .bind(self.hire_date)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete employee (assignments cascade)
    ///
    /// Returns whether a row was removed.
    pub async fn delete(id: EmployeeId, pool: &PgPool) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE emp_no = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count employees
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
