use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::ManagerUser;
use crate::api::dtos::requests::{CreateTokenRequest, ListTokensQuery, RegenerateTokenRequest};
use crate::api::dtos::responses::TokenResponse;
use crate::domain::models::token::{generate_code, AttendanceToken};
use crate::domain::ports::TokenRepository;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

const MAX_CODE_ATTEMPTS: usize = 5;

/// Re-rolls the code until it collides with nothing stored. The code
/// column is unique as a backstop, so running out of attempts on a
/// 36^6 space means something is badly wrong.
async fn ensure_unique_code(repo: &dyn TokenRepository, token: &mut AttendanceToken) -> Result<(), AppError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        if repo.find_by_code(&token.code).await?.is_none() {
            return Ok(());
        }
        token.code = generate_code();
    }

    warn!("No free check-in code after {} attempts", MAX_CODE_ATTEMPTS);
    Err(AppError::Internal)
}

pub async fn create_token(
    State(state): State<Arc<AppState>>,
    ManagerUser(user): ManagerUser,
    Json(payload): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&payload.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    // A past expiry is allowed: the token is simply born unusable.
    let expires_at = payload.expires_at
        .ok_or(AppError::Validation("expires_at is required".into()))?;

    let mut token = AttendanceToken::new(event.id.clone(), payload.label, expires_at);
    ensure_unique_code(state.token_repo.as_ref(), &mut token).await?;

    let created = state.token_repo.create(&token).await?;

    info!("Issued token {} for event {} (by {})", created.id, event.id, user.id);

    Ok((StatusCode::CREATED, Json(TokenResponse::from_token(created, event.name, Utc::now()))))
}

pub async fn regenerate_token(
    State(state): State<Arc<AppState>>,
    ManagerUser(user): ManagerUser,
    Path(token_id): Path<String>,
    Json(payload): Json<RegenerateTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut token = state.token_repo.find_by_id(&token_id).await?
        .ok_or(AppError::NotFound("Token not found".into()))?;

    let event = state.event_repo.find_by_id(&token.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    token.code = generate_code();
    ensure_unique_code(state.token_repo.as_ref(), &mut token).await?;

    // Rotation re-arms a revoked token; the expiry only moves when the
    // caller explicitly asks for it.
    token.is_active = true;
    if let Some(expires_at) = payload.expires_at {
        token.expires_at = expires_at;
    }
    token.updated_at = Utc::now();

    let updated = state.token_repo.update(&token).await?;

    info!("Regenerated token {} (by {})", updated.id, user.id);

    Ok(Json(TokenResponse::from_token(updated, event.name, Utc::now())))
}

pub async fn delete_token(
    State(state): State<Arc<AppState>>,
    ManagerUser(user): ManagerUser,
    Path(token_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.token_repo.delete(&token_id).await?;
    info!("Deleted token {} (by {})", token_id, user.id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tokens(
    State(state): State<Arc<AppState>>,
    ManagerUser(_user): ManagerUser,
    Query(query): Query<ListTokensQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.token_repo.list(query.event_id.as_deref()).await?;

    let now = Utc::now();
    let tokens: Vec<TokenResponse> = rows.into_iter()
        .map(|row| TokenResponse::from_listing(row, now))
        .collect();

    Ok(Json(tokens))
}
