use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Read-only view of a chapter member from the shared users table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub student_number: Option<String>,
    pub created_at: DateTime<Utc>,
}
