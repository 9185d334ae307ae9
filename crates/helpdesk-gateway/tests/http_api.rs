//! Drives the axum router in-process.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use helpdesk_gateway::{app_state::AppState, config, http};

const CONFIG: &str = r#"
version: 1
users:
  - { id: 1, name: "Admin", email: "admin@example.com", role: MANAGER, token: "mgr" }
  - { id: 2, name: "Sam", email: "sam@example.com", role: SUPPORT, token: "sup" }
  - { id: 3, name: "Uma", email: "uma@example.com", role: USER, token: "usr" }
  - { id: 4, name: "Ola", email: "ola@example.com", role: USER, token: "usr2" }
"#;

async fn app() -> Router {
    let cfg = config::load_from_str(CONFIG).unwrap();
    http::build_router(AppState::new(cfg).await.unwrap())
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, json)
}

#[tokio::test]
async fn missing_or_unknown_token_is_unauthorized() {
    let app = app().await;
    let (status, body) = call(&app, Method::GET, "/tickets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTH_FAILED");

    let (status, _) = call(&app, Method::GET, "/tickets", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ticket_lifecycle_over_http() {
    let app = app().await;

    let (status, t) = call(
        &app,
        Method::POST,
        "/tickets",
        Some("usr"),
        Some(json!({ "title": "Broken chair", "description": "leg snapped", "priority": "HIGH" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(t["status"], "OPEN");
    assert_eq!(t["priority"], "HIGH");
    assert_eq!(t["created_by"]["name"], "Uma");
    assert_eq!(t["assigned_to"], Value::Null);
    let id = t["id"].as_i64().unwrap();

    let (status, body) = call(&app, Method::PATCH, &format!("/tickets/{id}/assign"), Some("mgr"), Some(json!({ "user_id": 3 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_ASSIGNEE");

    let (status, t) = call(&app, Method::PATCH, &format!("/tickets/{id}/assign"), Some("mgr"), Some(json!({ "user_id": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(t["assigned_to"]["role"], "SUPPORT");

    let (status, body) = call(&app, Method::PATCH, &format!("/tickets/{id}/status"), Some("sup"), Some(json!({ "status": "RESOLVED" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_TRANSITION");

    let (status, t) = call(&app, Method::PATCH, &format!("/tickets/{id}/status"), Some("sup"), Some(json!({ "status": "IN_PROGRESS" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(t["status"], "IN_PROGRESS");

    let (status, log) = call(&app, Method::GET, &format!("/tickets/{id}/history"), Some("usr"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log[0]["old_status"], "OPEN");
    assert_eq!(log[0]["new_status"], "IN_PROGRESS");
    assert_eq!(log[0]["changed_by"], 2);

    let (status, _) = call(&app, Method::DELETE, &format!("/tickets/{id}"), Some("sup"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, Method::DELETE, &format!("/tickets/{id}"), Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&app, Method::GET, &format!("/tickets/{id}"), Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn comments_over_http() {
    let app = app().await;
    let (_, t) = call(&app, Method::POST, "/tickets", Some("usr"), Some(json!({ "title": "Dead mouse" }))).await;
    let id = t["id"].as_i64().unwrap();

    let (status, c) = call(&app, Method::POST, &format!("/tickets/{id}/comments"), Some("mgr"), Some(json!({ "comment": "replacing it" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(c["user"]["name"], "Admin");
    let cid = c["id"].as_i64().unwrap();

    let (status, thread) = call(&app, Method::GET, &format!("/tickets/{id}/comments"), Some("usr"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread.as_array().unwrap().len(), 1);

    let (status, _) = call(&app, Method::GET, &format!("/tickets/{id}/comments"), Some("usr2"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, Method::PATCH, &format!("/comments/{cid}"), Some("usr"), Some(json!({ "comment": "fixed" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, c) = call(&app, Method::PATCH, &format!("/comments/{cid}"), Some("mgr"), Some(json!({ "comment": "replaced" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(c["comment"], "replaced");

    let (status, _) = call(&app, Method::DELETE, &format!("/comments/{cid}"), Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, "/comments/999", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roles_are_manager_only() {
    let app = app().await;
    let (status, roles) = call(&app, Method::GET, "/api/roles", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roles, json!(["MANAGER", "SUPPORT", "USER"]));

    let (status, role) = call(&app, Method::GET, "/api/roles/SUPPORT", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(role, "SUPPORT");

    let (status, _) = call(&app, Method::GET, "/api/roles/ADMIN", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, "/api/roles", Some("sup"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ops_endpoints() {
    let app = app().await;
    let (status, _) = call(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let _ = call(&app, Method::GET, "/tickets", Some("usr"), None).await;
    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("helpdesk_operations_total"));
    assert!(text.contains("op=\"list_tickets\""));
}

#[tokio::test]
async fn malformed_requests_use_the_error_envelope() {
    let app = app().await;
    let (_, t) = call(&app, Method::POST, "/tickets", Some("usr"), Some(json!({ "title": "Flaky dock" }))).await;
    let id = t["id"].as_i64().unwrap();

    // Unknown status name: BAD_REQUEST, not the 422 reserved for INVALID_TRANSITION.
    let (status, body) = call(&app, Method::PATCH, &format!("/tickets/{id}/status"), Some("mgr"), Some(json!({ "status": "BOGUS" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("BOGUS"));

    let (status, body) = call(&app, Method::PATCH, &format!("/tickets/{id}/assign"), Some("mgr"), Some(json!({ "assignee": 2 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, body) = call(&app, Method::GET, "/tickets/abc", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, body) = call(&app, Method::PATCH, "/comments/abc", Some("mgr"), Some(json!({ "comment": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, body) = call(&app, Method::POST, &format!("/tickets/{id}/comments"), Some("usr"), Some(json!({ "comment": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn single_comment_read() {
    let app = app().await;
    let (_, t) = call(&app, Method::POST, "/tickets", Some("usr"), Some(json!({ "title": "No sound" }))).await;
    let id = t["id"].as_i64().unwrap();
    let (_, c) = call(&app, Method::POST, &format!("/tickets/{id}/comments"), Some("usr"), Some(json!({ "comment": "since monday" }))).await;
    let cid = c["id"].as_i64().unwrap();

    let (status, c) = call(&app, Method::GET, &format!("/comments/{cid}"), Some("usr"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(c["comment"], "since monday");
    assert_eq!(c["user"]["name"], "Uma");

    let (status, _) = call(&app, Method::GET, &format!("/comments/{cid}"), Some("usr2"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, Method::GET, "/comments/999", Some("mgr"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
