//! REST routes for employees.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};

use crate::common::EmployeeId;
use crate::domains::employees::actions::{self, EmployeeFilter};
use crate::domains::employees::data::{EmployeeData, EmployeePatch, NewEmployeeInput};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

/// Body returned by a successful delete
pub const DELETED_MESSAGE: &str = "successfully deleted";

/// GET /employees/:id
pub async fn get_employee_handler(
    Extension(state): Extension<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Json<EmployeeData>> {
    let Path(id) = path?;
    let employee = actions::get_employee(id, &state.deps).await?;
    Ok(Json(employee.into()))
}

/// GET /employees?last_name=&department=&date=
pub async fn list_employees_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<EmployeeFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeData>>> {
    let Query(filter) = query?;
    let employees = actions::list_employees(&filter, &state.deps).await?;
    Ok(Json(employees.into_iter().map(EmployeeData::from).collect()))
}

/// POST /employees
pub async fn create_employee_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<NewEmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeData>)> {
    let Json(input) = body?;
    let employee = actions::create_employee(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// PUT /employees/:id
pub async fn update_employee_handler(
    Extension(state): Extension<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
    body: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Json<EmployeeData>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    let employee = actions::update_employee(id, patch, &state.deps).await?;
    Ok(Json(employee.into()))
}

/// DELETE /employees/:id
pub async fn delete_employee_handler(
    Extension(state): Extension<AppState>,
    path: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<&'static str> {
    let Path(id) = path?;
    actions::delete_employee(id, &state.deps).await?;
    Ok(DELETED_MESSAGE)
}
