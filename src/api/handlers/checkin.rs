use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CheckinRequest;
use crate::api::dtos::responses::CheckinResponse;
use crate::domain::models::attendance::{Attendance, NewAttendanceParams};
use crate::domain::services::scan::decode_scan_input;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// Resolve, validate, record. Invalid and expired tokens surface as the
/// same rejection so the UI can keep scanning; the logs keep the real
/// reason. The duplicate pre-check is the fast path; under concurrent
/// scans the unique index in the repo settles it.
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CheckinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = decode_scan_input(&payload.token)
        .ok_or(AppError::Validation("Token must not be empty".into()))?;

    let token = match state.token_repo.find_by_code(&code).await? {
        Some(token) => token,
        None => {
            info!("Check-in rejected: unknown code (user {})", user.id);
            return Err(AppError::TokenInvalid);
        }
    };

    let now = Utc::now();
    if !token.is_active {
        info!("Check-in rejected: token {} is deactivated (user {})", token.id, user.id);
        return Err(AppError::TokenInvalid);
    }
    if token.is_expired(now) {
        info!("Check-in rejected: token {} expired at {} (user {})", token.id, token.expires_at, user.id);
        return Err(AppError::TokenInvalid);
    }

    if state.attendance_repo.find_for_token(&user.id, &token.event_id, &token.id).await?.is_some() {
        return Err(AppError::AlreadyCheckedIn);
    }

    let event = state.event_repo.find_by_id(&token.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let attendance = Attendance::new(NewAttendanceParams {
        user_id: user.id.clone(),
        event_id: token.event_id.clone(),
        token_id: Some(token.id.clone()),
        token_label: token.label.clone(),
        status: "present".to_string(),
        check_in_time: now,
        note: None,
    });

    let created = state.attendance_repo.create(&attendance).await?;

    info!("Check-in recorded: user {} event {} token {}", user.id, token.event_id, token.id);

    Ok(Json(CheckinResponse {
        attendance_id: created.id,
        event_id: created.event_id,
        event_name: event.name,
        token_label: created.token_label,
        status: created.status,
        check_in_time: created.check_in_time,
    }))
}
