//! HTTP handlers for task endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::task::{CreateTaskInput, TaskFilter, TaskService, UpdateTaskInput};
use crate::AppState;
use crate::models::Task;

/// List tasks, optionally filtered
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<Task>>> {
    let service = TaskService::new(state.db);
    let tasks = service.list(filter).await?;
    Ok(Json(tasks))
}

/// Get a task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.db);
    let task = service.get(id).await?;
    Ok(Json(task))
}

/// List tasks for an area
pub async fn list_tasks_by_area(
    State(state): State<AppState>,
    Path(area): Path<String>,
) -> AppResult<Json<Vec<Task>>> {
    let service = TaskService::new(state.db);
    let tasks = service
        .list(TaskFilter {
            area: Some(area),
            ..Default::default()
        })
        .await?;
    Ok(Json(tasks))
}

/// Create a new task
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let service = TaskService::new(state.db);
    let task = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.db);
    let task = service.update(id, input).await?;
    Ok(Json(task))
}

/// Start a task
pub async fn start_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.db);
    let task = service.start(id).await?;
    Ok(Json(task))
}

/// Finish a task
pub async fn finish_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let service = TaskService::new(state.db);
    let task = service.finish(id).await?;
    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = TaskService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
