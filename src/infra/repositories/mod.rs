pub mod sqlite_attendance_repo;
pub mod sqlite_event_repo;
pub mod sqlite_member_repo;
pub mod sqlite_token_repo;

pub mod postgres_attendance_repo;
pub mod postgres_event_repo;
pub mod postgres_member_repo;
pub mod postgres_token_repo;
