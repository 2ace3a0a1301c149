//! End-to-end HTTP tests against the full router.
//!
//! Each test builds a fresh in-memory SQLite database and drives the router
//! directly with `tower::ServiceExt::oneshot` — no sockets, no external
//! services (the lifecycle runs with mock validator/notifier).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api::{build_router, AppState};
use auth::TokenKeys;
use lifecycle::{ReportLifecycle, UserRole};
use services::mock::{MockNotifier, MockValidator};

const TEST_SECRET: &str = "test-secret";

async fn test_router() -> Router {
    let pool = db::pool::create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    db::pool::run_migrations(&pool).await.expect("migrations");

    let lifecycle = Arc::new(ReportLifecycle::new(
        pool.clone(),
        Arc::new(MockValidator::accepting("Pothole")),
        Arc::new(MockNotifier::new()),
    ));

    build_router(AppState::new(pool, lifecycle, TokenKeys::new(TEST_SECRET)))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn admin_token() -> String {
    TokenKeys::new(TEST_SECRET)
        .sign(Uuid::new_v4(), Some("admin@civic.com".into()), None, UserRole::Admin)
        .unwrap()
}

fn citizen_token() -> String {
    TokenKeys::new(TEST_SECRET)
        .sign(Uuid::new_v4(), None, None, UserRole::Citizen)
        .unwrap()
}

async fn register_citizen(router: &Router, email: &str) -> Value {
    let (status, user) = send(
        router,
        Method::POST,
        "/auth/register",
        Some(json!({ "email": email, "password": "hunter22" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

fn report_body(user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "category": "Pothole",
        "description": "Axle-deep pothole",
        "location": "RS Puram",
        "image_url": "https://cdn.example.com/p.jpg",
        "latitude": 11.0168,
        "longitude": 76.9558,
        "ward_id": 3
    })
}

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_user_without_password_hash() {
    let router = test_router().await;
    let user = register_citizen(&router, "a@example.com").await;

    assert_eq!(user["email"], "a@example.com");
    assert_eq!(user["role"], "CITIZEN");
    assert_eq!(user["provider"], "LOCAL");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let router = test_router().await;
    register_citizen(&router, "dup@example.com").await;

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/register",
        Some(json!({ "email": "dup@example.com", "password": "other" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_phone_registration_conflicts() {
    let router = test_router().await;
    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/register",
        Some(json!({
            "email": "one@example.com",
            "password": "hunter22",
            "phone": "+919999000001"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/register",
        Some(json!({
            "email": "two@example.com",
            "password": "hunter22",
            "phone": "+919999000001"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn email_login_issues_token_and_rejects_bad_password() {
    let router = test_router().await;
    register_citizen(&router, "login@example.com").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "login@example.com", "password": "hunter22" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["email"], "login@example.com");

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "login@example.com", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn phone_login_creates_a_citizen_account_on_first_use() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "phone": "+911234567890" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["phone_number"], "+911234567890");
    assert_eq!(body["user"]["role"], "CITIZEN");

    // Second login reuses the same account.
    let first_id = body["user"]["user_id"].clone();
    let (_, body) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "phone": "+911234567890" })),
        None,
    )
    .await;
    assert_eq!(body["user"]["user_id"], first_id);
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let router = test_router().await;
    let user = register_citizen(&router, "pw@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/change-password",
        Some(json!({
            "user_id": user_id,
            "old_password": "wrong",
            "new_password": "next"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/change-password",
        Some(json!({
            "user_id": user_id,
            "old_password": "hunter22",
            "new_password": "next"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "pw@example.com", "password": "next" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn change_password_accepts_the_spa_camel_case_body() {
    let router = test_router().await;
    let user = register_citizen(&router, "camel@example.com").await;

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/change-password",
        Some(json!({
            "userId": user["user_id"],
            "oldPassword": "hunter22",
            "newPassword": "next"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "camel@example.com", "password": "next" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_creation_and_status_flow() {
    let router = test_router().await;
    let user = register_citizen(&router, "reporter@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let (status, report) = send(
        &router,
        Method::POST,
        "/reports",
        Some(report_body(user_id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["status"], "OPEN");
    assert_eq!(report["assigned_department"], Value::Null);
    let report_id = report["report_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&router, Method::GET, "/reports", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(
        &router,
        Method::GET,
        &format!("/reports/{report_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["report_id"], report_id.as_str());

    let (status, updated) = send(
        &router,
        Method::PATCH,
        &format!("/reports/{report_id}/status"),
        Some(json!({ "status": "IN_PROGRESS" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN_PROGRESS");

    let (status, _) = send(
        &router,
        Method::PATCH,
        &format!("/reports/{report_id}/status"),
        Some(json!({ "status": "CLOSED" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_creation_accepts_the_spa_camel_case_user_id() {
    let router = test_router().await;
    let user = register_citizen(&router, "spa@example.com").await;

    let mut body = report_body(user["user_id"].as_str().unwrap());
    let id = body.as_object_mut().unwrap().remove("user_id").unwrap();
    body["userId"] = id;

    let (status, report) = send(&router, Method::POST, "/reports", Some(body), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["user_id"], user["user_id"]);
}

#[tokio::test]
async fn report_with_empty_category_is_rejected() {
    let router = test_router().await;
    let user = register_citizen(&router, "empty@example.com").await;
    let mut body = report_body(user["user_id"].as_str().unwrap());
    body["category"] = json!("");

    let (status, _) = send(&router, Method::POST, "/reports", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_only_routes_enforce_token_and_role() {
    let router = test_router().await;
    let user = register_citizen(&router, "guarded@example.com").await;
    let (_, report) = send(
        &router,
        Method::POST,
        "/reports",
        Some(report_body(user["user_id"].as_str().unwrap())),
        None,
    )
    .await;
    let report_id = report["report_id"].as_str().unwrap().to_string();
    let uri = format!("/reports/{report_id}");

    let (status, _) = send(&router, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&router, Method::DELETE, &uri, None, Some(&citizen_token())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let assign_uri = format!("/reports/{report_id}/assign-department");
    let (status, assigned) = send(
        &router,
        Method::PATCH,
        &assign_uri,
        Some(json!({ "department": "Roads & Bridges" })),
        Some(&admin_token()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned["assigned_department"], "Roads & Bridges");

    let (status, _) = send(&router, Method::DELETE, &uri, None, Some(&admin_token())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_listing_update_and_admin_delete() {
    let router = test_router().await;
    let user = register_citizen(&router, "managed@example.com").await;
    let user_id = user["user_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&router, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, patched) = send(
        &router,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(json!({ "fcm_token": "fcm-abc", "role": "OFFICIAL" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["fcm_token"], "fcm-abc");
    assert_eq!(patched["role"], "OFFICIAL");
    assert_eq!(patched["email"], "managed@example.com");

    let (status, _) = send(
        &router,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(json!({ "role": "SUPERUSER" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/users/{user_id}"),
        None,
        Some(&admin_token()),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, Method::GET, &format!("/users/{user_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_stats_and_heatmap_reflect_reports() {
    let router = test_router().await;
    let user = register_citizen(&router, "stats@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let (_, first) = send(&router, Method::POST, "/reports", Some(report_body(user_id)), None).await;
    let mut second_body = report_body(user_id);
    second_body["category"] = json!("Garbage");
    second_body["ward_id"] = json!(5);
    send(&router, Method::POST, "/reports", Some(second_body), None).await;

    let first_id = first["report_id"].as_str().unwrap();
    send(
        &router,
        Method::PATCH,
        &format!("/reports/{first_id}/status"),
        Some(json!({ "status": "RESOLVED" })),
        None,
    )
    .await;

    let (status, stats) = send(&router, Method::GET, "/analytics/dashboard-stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["open"], 1);
    assert_eq!(stats["resolved"], 1);
    assert!(stats["avg_resolution_days"].is_number());
    assert_eq!(stats["ward_performance"]["Ward 3"], 100.0);
    assert_eq!(stats["ward_performance"]["Ward 5"], 0.0);

    let (status, heatmap) = send(&router, Method::GET, "/analytics/heatmap", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let points = heatmap.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].as_array().unwrap().len(), 2);
}
