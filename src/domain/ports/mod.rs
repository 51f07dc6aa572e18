use crate::domain::models::{
    attendance::{Attendance, AttendanceRecord},
    event::Event,
    member::Member,
    token::{AttendanceToken, TokenWithEvent},
};
use crate::error::AppError;
use async_trait::async_trait;

/// Filters and paging for attendance listings. Handlers resolve
/// authorization before building one.
#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub label: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn create(&self, token: &AttendanceToken) -> Result<AttendanceToken, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<AttendanceToken>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<AttendanceToken>, AppError>;
    async fn list(&self, event_id: Option<&str>) -> Result<Vec<TokenWithEvent>, AppError>;
    async fn update(&self, token: &AttendanceToken) -> Result<AttendanceToken, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Inserts one attendance row. A unique-index hit on
    /// (user, event, token) comes back as `AlreadyCheckedIn`.
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Attendance>, AppError>;
    async fn find_for_token(&self, user_id: &str, event_id: &str, token_id: &str) -> Result<Option<Attendance>, AppError>;
    async fn list(&self, filter: &AttendanceFilter) -> Result<(Vec<AttendanceRecord>, i64), AppError>;
    async fn list_labels_by_event(&self, event_id: &str) -> Result<Vec<String>, AppError>;
    async fn update(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
