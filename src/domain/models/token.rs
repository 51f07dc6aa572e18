use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AttendanceToken {
    pub id: String,
    pub event_id: String,
    pub code: String,
    pub label: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceToken {
    pub fn new(event_id: String, label: Option<String>, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            code: generate_code(),
            label,
            expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }

    /// The string a QR renderer encodes. Scanners hand it back verbatim,
    /// so the check-in decoder accepts it as well as the bare code.
    pub fn scan_payload(&self) -> String {
        serde_json::json!({ "token": self.code }).to_string()
    }
}

/// Short manual-entry code, uppercase so it survives being read out loud
/// or typed from a projector slide.
pub fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(CODE_LENGTH)
        .collect()
}

/// Token row joined with the owning event's display name for listings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TokenWithEvent {
    pub id: String,
    pub event_id: String,
    pub event_name: String,
    pub code: String,
    pub label: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
