use crate::domain::{
    models::attendance::{Attendance, AttendanceRecord},
    ports::{AttendanceFilter, AttendanceRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a AttendanceFilter) {
    if let Some(user_id) = &filter.user_id {
        builder.push(" AND a.user_id = ").push_bind(user_id.as_str());
    }
    if let Some(event_id) = &filter.event_id {
        builder.push(" AND a.event_id = ").push_bind(event_id.as_str());
    }
    if let Some(label) = &filter.label {
        builder.push(" AND a.token_label = ").push_bind(label.as_str());
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepo {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendance (id, user_id, event_id, token_id, token_label, status, check_in_time, note, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&attendance.id).bind(&attendance.user_id).bind(&attendance.event_id).bind(&attendance.token_id)
            .bind(&attendance.token_label).bind(&attendance.status).bind(attendance.check_in_time)
            .bind(&attendance.note).bind(attendance.created_at).bind(attendance.updated_at)
            .fetch_one(&self.pool).await
            .map_err(|e| {
                // 23505 = PostgreSQL Unique Violation: the (user, event, token)
                // index caught a concurrent scan of the same token.
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.code().as_deref() == Some("23505")
                {
                    return AppError::AlreadyCheckedIn;
                }
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_for_token(&self, user_id: &str, event_id: &str, token_id: &str) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE user_id = $1 AND event_id = $2 AND token_id = $3"
        )
            .bind(user_id).bind(event_id).bind(token_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &AttendanceFilter) -> Result<(Vec<AttendanceRecord>, i64), AppError> {
        let mut count_builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM attendance a WHERE 1=1"
        );
        push_filters(&mut count_builder, filter);

        let total: i64 = count_builder.build_query_scalar()
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT a.*, u.name AS user_name, u.student_number AS user_student_number, e.name AS event_name
             FROM attendance a
             JOIN users u ON u.id = a.user_id
             JOIN events e ON e.id = a.event_id
             WHERE 1=1"
        );
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY a.check_in_time DESC LIMIT ").push_bind(filter.limit)
            .push(" OFFSET ").push_bind(filter.offset);

        let records = builder.build_query_as::<AttendanceRecord>()
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((records, total))
    }

    async fn list_labels_by_event(&self, event_id: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT token_label FROM attendance
             WHERE event_id = $1 AND token_label IS NOT NULL
             ORDER BY token_label"
        )
            .bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            "UPDATE attendance SET status = $1, token_label = $2, note = $3, updated_at = $4
             WHERE id = $5
             RETURNING *"
        )
            .bind(&attendance.status).bind(&attendance.token_label).bind(&attendance.note)
            .bind(attendance.updated_at).bind(&attendance.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Attendance record not found".into())); }
        Ok(())
    }
}
