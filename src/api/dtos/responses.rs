use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::token::{AttendanceToken, TokenWithEvent};

#[derive(Serialize)]
pub struct TokenResponse {
    pub id: String,
    pub event_id: String,
    pub event_name: String,
    pub code: String,
    pub label: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub expired: bool,
    pub scan_payload: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TokenResponse {
    pub fn from_token(token: AttendanceToken, event_name: String, now: DateTime<Utc>) -> Self {
        Self {
            expired: token.is_expired(now),
            scan_payload: token.scan_payload(),
            id: token.id,
            event_id: token.event_id,
            event_name,
            code: token.code,
            label: token.label,
            expires_at: token.expires_at,
            is_active: token.is_active,
            created_at: token.created_at,
            updated_at: token.updated_at,
        }
    }

    pub fn from_listing(row: TokenWithEvent, now: DateTime<Utc>) -> Self {
        let TokenWithEvent { id, event_id, event_name, code, label, expires_at, is_active, created_at, updated_at } = row;
        let token = AttendanceToken { id, event_id, code, label, expires_at, is_active, created_at, updated_at };
        Self::from_token(token, event_name, now)
    }
}

#[derive(Serialize)]
pub struct CheckinResponse {
    pub attendance_id: String,
    pub event_id: String,
    pub event_name: String,
    pub token_label: Option<String>,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}
