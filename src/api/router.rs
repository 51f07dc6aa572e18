use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{attendance, checkin, health, token};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Token lifecycle (manager only)
        .route("/api/v1/tokens", post(token::create_token).get(token::list_tokens))
        .route("/api/v1/tokens/{token_id}/regenerate", post(token::regenerate_token))
        .route("/api/v1/tokens/{token_id}", delete(token::delete_token))

        // Check-in (any authenticated member)
        .route("/api/v1/checkin", post(checkin::check_in))

        // Attendance records
        .route("/api/v1/attendance", get(attendance::list_attendance))
        .route("/api/v1/attendance/manual", post(attendance::create_manual))
        .route("/api/v1/attendance/{attendance_id}", put(attendance::update_attendance).delete(attendance::delete_attendance))
        .route("/api/v1/events/{event_id}/attendance/labels", get(attendance::list_event_labels))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
