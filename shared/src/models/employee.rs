//! Employee (empleado) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub area: Option<String>,
    pub hired_at: DateTime<Utc>,
}
