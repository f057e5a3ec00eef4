use chrono::NaiveDate;
use sqlx::error::ErrorKind;
use thiserror::Error;

use super::EmployeeId;

/// Postgres SQLSTATE for a value too long for its column (`VARCHAR(n)`).
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Errors raised by store implementations (Postgres or in-memory).
#[derive(Error, Debug)]
pub enum StoreError {
    /// A row with the same key or unique value already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The backend rejected the write: foreign key, not-null, check, or
    /// column length.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let ErrorKind::UniqueViolation = db_err.kind() {
                return Self::DuplicateKey(db_err.message().to_string());
            }
            let is_constraint = match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => true,
                _ => db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION),
            };
            if is_constraint {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

/// Domain errors surfaced by actions and the membership query.
///
/// Every variant is a distinct failure kind; the HTTP layer maps each one to a
/// status code in `server::error`.
#[derive(Error, Debug)]
pub enum PersonnelError {
    #[error("Could not find employee {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Could not find any employee with last name {0}")]
    SurnameNotFound(String),

    #[error("Could not find department {0}")]
    DepartmentNotFound(String),

    #[error("Employee {0} already exists")]
    EmployeeAlreadyExists(EmployeeId),

    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Path, query, or body that could not be read as the expected shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("No employees found in department {department} on {date}")]
    NoEmployeesFound { department: String, date: NaiveDate },

    #[error("No salaries recorded in department {department} on {date}")]
    NoSalariesFound { department: String, date: NaiveDate },

    #[error("Department name {0} is already in use")]
    DepartmentNameTaken(String),

    #[error(transparent)]
    Store(StoreError),
}

pub type PersonnelResult<T> = Result<T, PersonnelError>;

impl From<StoreError> for PersonnelError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(detail) | StoreError::ConstraintViolation(detail) => {
                Self::ConstraintViolation(detail)
            }
            other => Self::Store(other),
        }
    }
}
