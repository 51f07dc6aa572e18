use crate::domain::{models::token::{AttendanceToken, TokenWithEvent}, ports::TokenRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTokenRepo {
    pool: SqlitePool,
}

impl SqliteTokenRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepo {
    async fn create(&self, token: &AttendanceToken) -> Result<AttendanceToken, AppError> {
        sqlx::query_as::<_, AttendanceToken>(
            "INSERT INTO attendance_tokens (id, event_id, code, label, expires_at, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&token.id).bind(&token.event_id).bind(&token.code).bind(&token.label)
            .bind(token.expires_at).bind(token.is_active).bind(token.created_at).bind(token.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AttendanceToken>, AppError> {
        sqlx::query_as::<_, AttendanceToken>("SELECT * FROM attendance_tokens WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<AttendanceToken>, AppError> {
        sqlx::query_as::<_, AttendanceToken>("SELECT * FROM attendance_tokens WHERE code = ?")
            .bind(code).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, event_id: Option<&str>) -> Result<Vec<TokenWithEvent>, AppError> {
        match event_id {
            Some(event_id) => sqlx::query_as::<_, TokenWithEvent>(
                "SELECT t.*, e.name AS event_name FROM attendance_tokens t
                 JOIN events e ON e.id = t.event_id
                 WHERE t.event_id = ?
                 ORDER BY t.created_at DESC"
            )
                .bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, TokenWithEvent>(
                "SELECT t.*, e.name AS event_name FROM attendance_tokens t
                 JOIN events e ON e.id = t.event_id
                 ORDER BY t.created_at DESC"
            )
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn update(&self, token: &AttendanceToken) -> Result<AttendanceToken, AppError> {
        sqlx::query_as::<_, AttendanceToken>(
            "UPDATE attendance_tokens SET code = ?, label = ?, expires_at = ?, is_active = ?, updated_at = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&token.code).bind(&token.label).bind(token.expires_at).bind(token.is_active).bind(token.updated_at)
            .bind(&token.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendance_tokens WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Token not found".into())); }
        Ok(())
    }
}
