use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    pub event_id: String,
    pub label: Option<String>,
    // Required, but kept optional here so a missing value surfaces as a
    // validation error instead of a body-deserialization rejection.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct RegenerateTokenRequest {
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ListTokensQuery {
    pub event_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckinRequest {
    /// Raw scanner output: either the bare code or the QR payload JSON.
    pub token: String,
}

#[derive(Deserialize)]
pub struct CreateManualAttendanceRequest {
    pub user_id: String,
    pub event_id: String,
    pub status: String,
    pub label: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<String>,
    pub token_label: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct ListAttendanceQuery {
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub label: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
