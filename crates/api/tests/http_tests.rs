//! End-to-end tests for the HTTP surface.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! an in-memory SQLite database, so no socket or external store is needed.

use std::time::Duration;

use api::{router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    app_with_pool().await.0
}

async fn app_with_pool() -> (Router, db::DbPool) {
    let pool = db::pool::create_in_memory_pool().await.unwrap();
    db::migrate::run_migrations(&pool).await.unwrap();
    (router(AppState::new(pool.clone()), Duration::from_secs(5)), pool)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

async fn create_repo(app: &Router, name: &str, url: &str) -> Value {
    let (status, body) = post_json(
        app,
        "/repositories",
        json!({ "name": name, "source_provider": "github", "source_url": url }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

// ============================================================
// /health
// ============================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// ============================================================
// POST /repositories
// ============================================================

#[tokio::test]
async fn create_repository_then_repeat_conflicts() {
    let app = app().await;
    let payload = json!({
        "name": "svc",
        "source_provider": "github",
        "source_url": "https://github.com/org/svc",
    });

    let (status, body) = post_json(&app, "/repositories", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "svc");
    assert_eq!(body["source_provider"], "github");
    assert_eq!(body["source_url"], "https://github.com/org/svc");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body["created_at"].is_string());
    assert!(body.get("targets").is_none());

    let (status, body) = post_json(&app, "/repositories", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "repository with this source_url already exists");
}

#[tokio::test]
async fn create_repository_rejects_invalid_fields() {
    let app = app().await;

    let cases = [
        (
            json!({ "name": " ", "source_provider": "github", "source_url": "https://x" }),
            "name is required",
        ),
        (
            json!({ "name": "svc", "source_url": "https://x" }),
            "source_provider is required",
        ),
        (
            json!({ "name": "svc", "source_provider": "bitbucket", "source_url": "https://x" }),
            "invalid source_provider. allowed: github, gitlab, gitea",
        ),
        (
            json!({ "name": "svc", "source_provider": "github", "source_url": "ftp://x" }),
            "source_url must start with https:// or ssh://",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = post_json(&app, "/repositories", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }

    let (_, listed) = send(&app, Method::GET, "/repositories", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/repositories", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request body");
}

// ============================================================
// POST /repositories/{id}/targets
// ============================================================

#[tokio::test]
async fn target_on_unknown_repository_is_not_found_even_with_bad_body() {
    let app = app().await;

    let (status, body) = post_json(
        &app,
        "/repositories/unknown/targets",
        json!({ "provider": "gitlab", "remote_url": "https://gitlab.com/x" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "repository not found");

    let (status, _) = send(&app, Method::POST, "/repositories/unknown/targets", Some("garbage")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_target_validates_and_detects_duplicates() {
    let app = app().await;
    let repo = create_repo(&app, "svc", "https://github.com/org/svc").await;
    let uri = format!("/repositories/{}/targets", repo["id"].as_str().unwrap());

    let (status, body) = post_json(
        &app,
        &uri,
        json!({ "provider": "gitea", "remote_url": "https://x" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["repository_id"], repo["id"]);
    assert_eq!(body["provider"], "gitea");
    assert_eq!(body["remote_url"], "https://x");

    let (status, body) = post_json(
        &app,
        &uri,
        json!({ "provider": "gitlab", "remote_url": "https://x" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "target with this remote_url already exists for this repository"
    );

    let (status, body) = post_json(
        &app,
        &uri,
        json!({ "provider": "bitbucket", "remote_url": "https://y" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid provider. allowed: github, gitlab, gitea");

    let (status, _) = send(&app, Method::POST, &uri, Some("[]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================
// GET /repositories
// ============================================================

#[tokio::test]
async fn list_returns_repositories_with_their_targets() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/repositories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let repo = create_repo(&app, "svc", "https://github.com/org/svc").await;
    let lonely = create_repo(&app, "lonely", "ssh://github.com/org/lonely").await;
    let uri = format!("/repositories/{}/targets", repo["id"].as_str().unwrap());
    for url in ["https://gitlab.com/m/svc", "ssh://gitea.local/m/svc"] {
        let (status, _) = post_json(&app, &uri, json!({ "provider": "gitlab", "remote_url": url })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/repositories", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);

    assert_eq!(listed[0]["id"], lonely["id"]);
    assert!(listed[0].get("targets").is_none());

    assert_eq!(listed[1]["id"], repo["id"]);
    let mut urls: Vec<_> = listed[1]["targets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["remote_url"].as_str().unwrap().to_owned())
        .collect();
    urls.sort();
    assert_eq!(urls, ["https://gitlab.com/m/svc", "ssh://gitea.local/m/svc"]);
}

#[tokio::test]
async fn store_failure_during_listing_is_an_opaque_500() {
    let (app, pool) = app_with_pool().await;
    create_repo(&app, "svc", "https://github.com/org/svc").await;

    sqlx::query("DROP TABLE replication_targets")
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/repositories", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn corrupt_provider_in_store_is_an_opaque_500() {
    let (app, pool) = app_with_pool().await;
    create_repo(&app, "svc", "https://github.com/org/svc").await;

    sqlx::query("UPDATE repositories SET source_provider = 'bitbucket'")
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/repositories", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
