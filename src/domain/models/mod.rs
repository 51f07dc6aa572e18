pub mod attendance;
pub mod auth;
pub mod event;
pub mod member;
pub mod token;
