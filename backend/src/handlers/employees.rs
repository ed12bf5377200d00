//! HTTP handlers for employee endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::employee::{CreateEmployeeInput, EmployeeService, UpdateEmployeeInput};
use crate::AppState;
use crate::models::Employee;

/// List all employees
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let service = EmployeeService::new(state.db);
    let employees = service.list().await?;
    Ok(Json(employees))
}

/// Get an employee by id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service.get(id).await?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let service = EmployeeService::new(state.db);
    let employee = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service.update(id, input).await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = EmployeeService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
