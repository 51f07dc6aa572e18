pub mod attendance;
pub mod checkin;
pub mod health;
pub mod token;
