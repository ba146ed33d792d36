//! Router-level tests against the in-memory store

use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todoctl_core::MemoryStore;
use todoctl_server::{build_router, AppState, ServerConfig};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    build_router(state, &ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a shared router.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create_todo(app: &Router, title: &str) -> i64 {
    let resp = send(app, json_request("POST", "/todo", json!({ "title": title }))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["data"]["id"].as_i64().unwrap()
}

async fn create_item(app: &Router, todo_id: i64, name: &str) -> Value {
    let resp = send(
        app,
        json_request("POST", "/todo-item", json!({ "todoId": todo_id, "name": name })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- health ---

#[tokio::test]
async fn health_is_ok() {
    let resp = send(&app(), empty_request("GET", "/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

// --- todo ---

#[tokio::test]
async fn create_todo_returns_envelope() {
    let resp = send(
        &app(),
        json_request("POST", "/todo", json!({ "title": "T1", "description": "first" })),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["title"], "T1");
    assert_eq!(body["data"]["description"], "first");
}

#[tokio::test]
async fn create_todo_blank_title_is_400() {
    let resp = send(&app(), json_request("POST", "/todo", json!({ "title": "  " }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "validation_error");
}

#[tokio::test]
async fn create_todo_nul_in_title_is_400() {
    let resp = send(&app(), json_request("POST", "/todo", json!({ "title": "a\u{0}b" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "title: must not contain NUL characters"
    );
}

#[tokio::test]
async fn create_todo_missing_title_is_422() {
    let resp = send(&app(), json_request("POST", "/todo", json!({ "description": "x" }))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_todos_with_and_without_items() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    create_item(&app, id, "I1").await;

    let bare = body_json(send(&app, empty_request("GET", "/todo")).await).await;
    assert_eq!(bare.as_array().unwrap().len(), 1);
    assert!(bare[0].get("items").is_none());

    let full = body_json(send(&app, empty_request("GET", "/todo/with-items")).await).await;
    assert_eq!(full[0]["items"][0]["name"], "I1");
}

#[tokio::test]
async fn get_todo_not_found() {
    let resp = send(&app(), empty_request("GET", "/todo/41")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Todo not found");
}

#[tokio::test]
async fn get_todo_bad_id_is_400() {
    let resp = send(&app(), empty_request("GET", "/todo/abc")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_todo_keeps_unsent_fields() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/todo", json!({ "title": "T1", "description": "keep" })),
    )
    .await;
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todo/{id}"), json!({ "title": "T2" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["title"], "T2");
    assert_eq!(body["description"], "keep");
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn patch_todo_not_found() {
    let resp = send(&app(), json_request("PATCH", "/todo/9", json!({ "title": "x" }))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_cascades_to_items() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    let item = create_item(&app, id, "I1").await;
    let item_id = item["id"].as_i64().unwrap();

    let resp = send(&app, empty_request("DELETE", &format!("/todo/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("GET", &format!("/todo/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("GET", &format!("/todo-item/{item_id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("DELETE", &format!("/todo/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- todo-item ---

#[tokio::test]
async fn create_item_defaults_is_completed() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    let item = create_item(&app, id, "I1").await;

    assert_eq!(item["id"], 1);
    assert_eq!(item["todoId"], id);
    assert_eq!(item["isCompleted"], false);
}

#[tokio::test]
async fn create_item_for_missing_todo_is_409() {
    let resp = send(
        &app(),
        json_request("POST", "/todo-item", json!({ "todoId": 77, "name": "orphan" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn item_reads_carry_parent() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    let item = create_item(&app, id, "I1").await;

    let one = body_json(
        send(&app, empty_request("GET", &format!("/todo-item/{}", item["id"]))).await,
    )
    .await;
    assert_eq!(one["todo"]["title"], "T1");
    assert!(one["todo"].get("items").is_none());

    let all = body_json(send(&app, empty_request("GET", "/todo-item")).await).await;
    assert_eq!(all[0]["todo"]["id"], id);
}

#[tokio::test]
async fn patch_item_completion() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    let item = create_item(&app, id, "I1").await;

    let resp = send(
        &app,
        json_request(
            "PATCH",
            &format!("/todo-item/{}", item["id"]),
            json!({ "isCompleted": true }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["isCompleted"], true);
    assert_eq!(body["name"], "I1");
    assert_eq!(body["todoId"], id);
}

#[tokio::test]
async fn delete_item_leaves_parent() {
    let app = app();
    let id = create_todo(&app, "T1").await;
    let item = create_item(&app, id, "I1").await;
    let uri = format!("/todo-item/{}", item["id"]);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "TodoItem not found");

    let parent = body_json(send(&app, empty_request("GET", &format!("/todo/{id}"))).await).await;
    assert_eq!(parent["title"], "T1");
    assert_eq!(parent["items"], json!([]));
}
