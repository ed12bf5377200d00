//! Task (tarea) models for kitchen and floor work items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_proceso")]
    InProgress,
    #[serde(rename = "finalizada")]
    Finished,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en_proceso",
            TaskStatus::Finished => "finalizada",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "pendiente" => Some(TaskStatus::Pending),
            "en_proceso" => Some(TaskStatus::InProgress),
            "finalizada" => Some(TaskStatus::Finished),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "baja",
            TaskPriority::Medium => "media",
            TaskPriority::High => "alta",
        }
    }

    pub fn parse(s: &str) -> Option<TaskPriority> {
        match s {
            "baja" => Some(TaskPriority::Low),
            "media" => Some(TaskPriority::Medium),
            "alta" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// A work item, optionally assigned to an employee and linked to an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub area: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_employee: Option<Uuid>,
    pub related_order: Option<Uuid>,
    pub observations: String,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
