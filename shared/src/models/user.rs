//! Application user (usuario) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A back-office user account. The password hash never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
