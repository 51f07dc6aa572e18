use std::sync::Arc;
use crate::domain::ports::{
    AttendanceRepository, EventRepository, MemberRepository, TokenRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub member_repo: Arc<dyn MemberRepository>,
    pub token_repo: Arc<dyn TokenRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
}
