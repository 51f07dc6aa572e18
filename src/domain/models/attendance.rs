use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendance {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub token_id: Option<String>,
    pub token_label: Option<String>,
    pub status: String, // present, excused, sick, absent
    pub check_in_time: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewAttendanceParams {
    pub user_id: String,
    pub event_id: String,
    pub token_id: Option<String>,
    pub token_label: Option<String>,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
    pub note: Option<String>,
}

impl Attendance {
    pub fn new(params: NewAttendanceParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            event_id: params.event_id,
            token_id: params.token_id,
            token_label: params.token_label,
            status: params.status,
            check_in_time: params.check_in_time,
            note: params.note,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Attendance row joined with user and event display fields. This is
/// what listings return so clients never resolve ids themselves.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_student_number: Option<String>,
    pub event_id: String,
    pub event_name: String,
    pub token_id: Option<String>,
    pub token_label: Option<String>,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
