//! Task (tarea) service: work items with filters and a small lifecycle
//!
//! Tasks move pendiente -> en_proceso -> finalizada; the lifecycle
//! endpoints stamp the start and finish times.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskPriority, TaskStatus};

/// Task service
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

/// Database row for a task
#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    area: String,
    status: String,
    priority: String,
    assigned_employee: Option<Uuid>,
    related_order: Option<Uuid>,
    observations: String,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl TaskRow {
    fn into_task(self) -> AppResult<Task> {
        let status = TaskStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("bad task status: {}", self.status)))?;
        let priority = TaskPriority::parse(&self.priority)
            .ok_or_else(|| AppError::Internal(format!("bad task priority: {}", self.priority)))?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            area: self.area,
            status,
            priority,
            assigned_employee: self.assigned_employee,
            related_order: self.related_order,
            observations: self.observations,
            created_at: self.created_at,
            started_at: self.started_at,
            finished_at: self.finished_at,
        })
    }
}

/// Optional filters for listing tasks
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub area: Option<String>,
    pub assigned_employee: Option<Uuid>,
    pub related_order: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Input for creating a task
#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub area: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_employee: Option<Uuid>,
    pub related_order: Option<Uuid>,
    #[serde(default)]
    pub observations: String,
}

/// Input for updating a task
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_employee: Option<Uuid>,
    pub related_order: Option<Uuid>,
    pub observations: Option<String>,
}

const TASK_COLUMNS: &str = "id, title, description, area, status, priority, assigned_employee, \
     related_order, observations, created_at, started_at, finished_at";

impl TaskService {
    /// Create a new TaskService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List tasks matching the given filters
    pub async fn list(&self, filter: TaskFilter) -> AppResult<Vec<Task>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM tasks WHERE 1=1", TASK_COLUMNS));

        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            builder.push(" AND priority = ").push_bind(priority.as_str());
        }
        if let Some(area) = filter.area {
            builder.push(" AND area = ").push_bind(area);
        }
        if let Some(employee) = filter.assigned_employee {
            builder
                .push(" AND assigned_employee = ")
                .push_bind(employee);
        }
        if let Some(order) = filter.related_order {
            builder.push(" AND related_order = ").push_bind(order);
        }
        if let Some(from) = filter.from {
            builder.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            builder.push(" AND created_at <= ").push_bind(to);
        }

        builder.push(" ORDER BY created_at DESC");

        let rows = builder.build_query_as::<TaskRow>().fetch_all(&self.db).await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Get a task by id
    pub async fn get(&self, id: Uuid) -> AppResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarea".to_string()))?;

        row.into_task()
    }

    /// Create a new task
    pub async fn create(&self, input: CreateTaskInput) -> AppResult<Task> {
        if input.title.trim().is_empty() || input.area.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title/area".to_string(),
                message: "Title and area are required".to_string(),
                message_es: "Título y área son obligatorios".to_string(),
            });
        }

        let status = input.status.unwrap_or(TaskStatus::Pending);
        let priority = input.priority.unwrap_or(TaskPriority::Medium);

        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (title, description, area, status, priority,
                               assigned_employee, related_order, observations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.area)
        .bind(status.as_str())
        .bind(priority.as_str())
        .bind(input.assigned_employee)
        .bind(input.related_order)
        .bind(&input.observations)
        .fetch_one(&self.db)
        .await?;

        row.into_task()
    }

    /// Update a task
    pub async fn update(&self, id: Uuid, input: UpdateTaskInput) -> AppResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                area = COALESCE($4, area),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                assigned_employee = COALESCE($7, assigned_employee),
                related_order = COALESCE($8, related_order),
                observations = COALESCE($9, observations)
            WHERE id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.area)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.priority.map(|p| p.as_str()))
        .bind(input.assigned_employee)
        .bind(input.related_order)
        .bind(&input.observations)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarea".to_string()))?;

        row.into_task()
    }

    /// Move a task to en_proceso and stamp the start time
    pub async fn start(&self, id: Uuid) -> AppResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "UPDATE tasks SET status = 'en_proceso', started_at = NOW() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarea".to_string()))?;

        row.into_task()
    }

    /// Move a task to finalizada and stamp the finish time
    pub async fn finish(&self, id: Uuid) -> AppResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "UPDATE tasks SET status = 'finalizada', finished_at = NOW() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarea".to_string()))?;

        row.into_task()
    }

    /// Delete a task
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tarea".to_string()));
        }

        Ok(())
    }
}
