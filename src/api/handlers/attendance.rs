use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::requests::{CreateManualAttendanceRequest, ListAttendanceQuery, UpdateAttendanceRequest};
use crate::api::dtos::responses::{Paginated, PaginationMeta};
use crate::domain::models::attendance::{Attendance, NewAttendanceParams};
use crate::domain::ports::AttendanceFilter;
use crate::domain::services::scan::is_valid_status;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn create_manual(
    State(state): State<Arc<AppState>>,
    ManagerUser(user): ManagerUser,
    Json(payload): Json<CreateManualAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_status(&payload.status) {
        return Err(AppError::Validation(format!("Unknown status '{}'", payload.status)));
    }

    let member = state.member_repo.find_by_id(&payload.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    let event = state.event_repo.find_by_id(&payload.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let attendance = Attendance::new(NewAttendanceParams {
        user_id: member.id,
        event_id: event.id,
        token_id: None,
        token_label: payload.label,
        status: payload.status,
        check_in_time: Utc::now(),
        note: payload.note,
    });

    let created = state.attendance_repo.create(&attendance).await?;

    info!("Manual attendance {} recorded (by {})", created.id, user.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_attendance(
    State(state): State<Arc<AppState>>,
    ManagerUser(_user): ManagerUser,
    Path(attendance_id): Path<String>,
    Json(payload): Json<UpdateAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut attendance = state.attendance_repo.find_by_id(&attendance_id).await?
        .ok_or(AppError::NotFound("Attendance record not found".into()))?;

    if let Some(status) = payload.status {
        if !is_valid_status(&status) {
            return Err(AppError::Validation(format!("Unknown status '{}'", status)));
        }
        attendance.status = status;
    }

    if let Some(label) = payload.token_label {
        attendance.token_label = if label.is_empty() { None } else { Some(label) };
    }

    if let Some(note) = payload.note {
        attendance.note = if note.is_empty() { None } else { Some(note) };
    }

    attendance.updated_at = Utc::now();

    let updated = state.attendance_repo.update(&attendance).await?;
    info!("Attendance updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_attendance(
    State(state): State<Arc<AppState>>,
    ManagerUser(_user): ManagerUser,
    Path(attendance_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.attendance_repo.delete(&attendance_id).await?;
    info!("Attendance deleted: {}", attendance_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn list_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    // Members only ever see their own history; managers may scope freely.
    let user_id = if user.is_manager() {
        query.user_id
    } else {
        if let Some(requested) = &query.user_id
            && requested != &user.id
        {
            return Err(AppError::Forbidden("Members may only view their own attendance".into()));
        }
        Some(user.id.clone())
    };

    let filter = AttendanceFilter {
        user_id,
        event_id: query.event_id,
        label: query.label,
        limit,
        offset: (page - 1) * limit,
    };

    let (records, total) = state.attendance_repo.list(&filter).await?;

    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(Json(Paginated {
        data: records,
        meta: PaginationMeta { page, limit, total, total_pages },
    }))
}

pub async fn list_event_labels(
    State(state): State<Arc<AppState>>,
    ManagerUser(_user): ManagerUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let labels = state.attendance_repo.list_labels_by_event(&event.id).await?;
    Ok(Json(labels))
}
