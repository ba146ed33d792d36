//! TodoItem endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use todoctl_core::{CreateTodoItem, TodoItem, UpdateTodoItem};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::state::AppState;

/// GET /todo-item - list items with their parent todo
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.items().find_all().await?))
}

/// POST /todo-item - create a new item
async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoItem>,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let item = state.items().create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /todo-item/{id}
async fn get_item(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.items().find_one(id).await?))
}

/// PATCH /todo-item/{id}
async fn update_item(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    Json(req): Json<UpdateTodoItem>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.items().update(id, req).await?))
}

/// DELETE /todo-item/{id}
async fn delete_item(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.items().remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// TodoItem routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todo-item", get(list_items).post(create_item))
        .route(
            "/todo-item/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
}
