//! REST routes for departments.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domains::departments::actions;
use crate::domains::departments::data::DepartmentData;
use crate::domains::salaries::actions as salary_actions;
use crate::domains::salaries::data::AverageSalaryData;
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct AverageSalaryQuery {
    pub date: String,
}

/// GET /departments
pub async fn list_departments_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<DepartmentData>>> {
    let departments = actions::list_departments(&state.deps).await?;
    Ok(Json(departments.into_iter().map(DepartmentData::from).collect()))
}

/// POST /departments
pub async fn create_department_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<DepartmentData>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DepartmentData>)> {
    let Json(input) = body?;
    let department = actions::create_department(input.into(), &state.deps).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// GET /departments/:name/average_salary?date=
pub async fn average_salary_handler(
    Extension(state): Extension<AppState>,
    Path(name): Path<String>,
    query: Result<Query<AverageSalaryQuery>, QueryRejection>,
) -> ApiResult<Json<AverageSalaryData>> {
    let Query(query) = query?;
    let average = salary_actions::average_salary_on(&name, &query.date, &state.deps).await?;
    Ok(Json(average.into()))
}
