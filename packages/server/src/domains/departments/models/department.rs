use sqlx::PgPool;

use crate::common::{StoreError, StoreResult};

/// Column limits from `departments` (`CHAR(4)` / `VARCHAR(40)`).
pub const DEPT_NO_CHARS: usize = 4;
pub const DEPT_NAME_MAX_CHARS: usize = 40;

/// Department model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Department {
    #[sqlx(rename = "dept_no")]
    pub id: String,
    #[sqlx(rename = "dept_name")]
    pub name: String,
}

impl Department {
    /// Checks the column limits the `departments` table enforces.
    pub fn check_column_limits(&self) -> StoreResult<()> {
        if self.id.chars().count() != DEPT_NO_CHARS {
            return Err(StoreError::ConstraintViolation(format!(
                "dept_no must be exactly {DEPT_NO_CHARS} characters"
            )));
        }
        if self.name.is_empty() || self.name.chars().count() > DEPT_NAME_MAX_CHARS {
            return Err(StoreError::ConstraintViolation(format!(
                "dept_name must be 1 to {DEPT_NAME_MAX_CHARS} characters"
            )));
        }
        Ok(())
    }

    /// Find department by its unique name
    pub async fn find_by_name(name: &str, pool: &PgPool) -> StoreResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM departments WHERE dept_name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all departments, ordered by dept_no
    pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM departments ORDER BY dept_no")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new department
    pub async fn insert(&self, pool: &PgPool) -> StoreResult<Self> {
        // CHAR(4) would silently pad a short code
        self.check_column_limits()?;

        sqlx::query_as::<_, Self>(
            "INSERT INTO departments (dept_no, dept_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(&self.id)
        .bind(&self.name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Count departments
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
