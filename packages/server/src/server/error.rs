//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{PersonnelError, StoreError};

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Route-level error: a domain error plus its HTTP mapping.
#[derive(Debug)]
pub struct ApiError(pub PersonnelError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            PersonnelError::EmployeeNotFound(_)
            | PersonnelError::SurnameNotFound(_)
            | PersonnelError::DepartmentNotFound(_)
            | PersonnelError::NoEmployeesFound { .. }
            | PersonnelError::NoSalariesFound { .. } => StatusCode::NOT_FOUND,
            PersonnelError::EmployeeAlreadyExists(_) | PersonnelError::Validation(_) => {
                StatusCode::CONFLICT
            }
            PersonnelError::InvalidDate(_)
            | PersonnelError::InvalidRequest(_)
            | PersonnelError::ConstraintViolation(_)
            | PersonnelError::DepartmentNameTaken(_) => StatusCode::BAD_REQUEST,
            PersonnelError::Store(StoreError::DuplicateKey(_))
            | PersonnelError::Store(StoreError::ConstraintViolation(_)) => StatusCode::BAD_REQUEST,
            PersonnelError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match &self.0 {
            PersonnelError::EmployeeNotFound(_)
            | PersonnelError::SurnameNotFound(_)
            | PersonnelError::DepartmentNotFound(_) => "NOT_FOUND",
            PersonnelError::NoEmployeesFound { .. } => "NO_EMPLOYEES_FOUND",
            PersonnelError::NoSalariesFound { .. } => "NO_SALARIES_FOUND",
            PersonnelError::EmployeeAlreadyExists(_) => "ALREADY_EXISTS",
            PersonnelError::Validation(_) => "VALIDATION_ERROR",
            PersonnelError::InvalidDate(_) => "INVALID_DATE",
            PersonnelError::InvalidRequest(_) => "INVALID_REQUEST",
            PersonnelError::ConstraintViolation(_)
            | PersonnelError::Store(StoreError::DuplicateKey(_))
            | PersonnelError::Store(StoreError::ConstraintViolation(_)) => "CONSTRAINT_VIOLATION",
            PersonnelError::DepartmentNameTaken(_) => "DEPARTMENT_NAME_TAKEN",
            PersonnelError::Store(StoreError::Database(_)) => "DATABASE_ERROR",
        }
    }
}

impl From<PersonnelError> for ApiError {
    fn from(err: PersonnelError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

// Extractor failures answer with the same `{code, message}` body as every
// other error instead of axum's plain-text rejection.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PersonnelError::InvalidRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(PersonnelError::InvalidRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(PersonnelError::InvalidRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        // Database details stay in the logs
        let message = match &self.0 {
            PersonnelError::Store(StoreError::Database(_)) => "Internal database error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EmployeeId;
    use chrono::NaiveDate;

    fn status_of(err: PersonnelError) -> StatusCode {
        ApiError(err).status_code()
    }

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(
            status_of(PersonnelError::EmployeeNotFound(EmployeeId::from_raw(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PersonnelError::SurnameNotFound("Nobody".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PersonnelError::DepartmentNotFound("Unicorn".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PersonnelError::NoEmployeesFound {
                department: "Marketing".into(),
                date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PersonnelError::EmployeeAlreadyExists(EmployeeId::from_raw(1))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(PersonnelError::Validation(vec!["id"])),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(PersonnelError::InvalidDate("2020-13-40".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PersonnelError::ConstraintViolation("too long".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PersonnelError::InvalidRequest("gender: unknown variant".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PersonnelError::NoSalariesFound {
                department: "Marketing".into(),
                date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PersonnelError::Store(StoreError::Database(
                sqlx::Error::PoolTimedOut
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_hide_details() {
        let response =
            ApiError(PersonnelError::Store(StoreError::Database(sqlx::Error::PoolClosed)))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
