mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_manual(app: &TestApp, bearer: &str, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/attendance/manual")
            .header(header::AUTHORIZATION, bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_manual_entry_without_token() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1",
        "event_id": "event-1",
        "status": "sick",
        "note": "Called in before the meeting"
    })).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "sick");
    assert_eq!(body["note"], "Called in before the meeting");
    assert!(body["token_id"].is_null());

    // Manual entries are not bound by the one-scan rule.
    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1",
        "event_id": "event-1",
        "status": "present",
        "label": "Meeting 2"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(parse_body(res).await["token_label"], "Meeting 2");
}

#[tokio::test]
async fn test_manual_entry_unknown_user_or_event() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "ghost", "event_id": "event-1", "status": "present"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "no-such-event", "status": "present"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manual_entry_rejects_unknown_status() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "event-1", "status": "vacationing"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"]["kind"], "validation");
}

#[tokio::test]
async fn test_manual_entry_requires_manager() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("user-1", "Alice", "member");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "event-1", "status": "present"
    })).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_attendance_fields() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "event-1", "status": "absent", "label": "Meeting 1"
    })).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/attendance/{}", id))
            .header(header::AUTHORIZATION, &bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "excused", "note": "Family matter"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "excused");
    assert_eq!(body["note"], "Family matter");
    assert_eq!(body["token_label"], "Meeting 1");

    // An empty string clears the label.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/attendance/{}", id))
            .header(header::AUTHORIZATION, &bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"token_label": ""}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["token_label"].is_null());
    assert_eq!(body["status"], "excused");
}

#[tokio::test]
async fn test_update_attendance_rejects_unknown_status() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "event-1", "status": "present"
    })).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/attendance/{}", id))
            .header(header::AUTHORIZATION, &bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "asleep"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_attendance() {
    let app = TestApp::new().await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/attendance/no-such-record")
            .header(header::AUTHORIZATION, &bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "present"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_attendance() {
    let app = TestApp::new().await;
    app.seed_event("event-1", "Weekly Meeting").await;
    app.seed_user("user-1", "Alice", None).await;
    let bearer = app.bearer_for("mgr-1", "Dina", "admin");

    let res = post_manual(&app, &bearer, json!({
        "user_id": "user-1", "event_id": "event-1", "status": "present"
    })).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/attendance/{}", id))
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "deleted");

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/attendance/{}", id))
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
