use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Read-only view of an event owned by the wider management app.
/// Lifecycle status is display data; token validity is purely
/// time and flag based.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub status: String, // upcoming, ongoing, completed, cancelled
    pub created_at: DateTime<Utc>,
}
