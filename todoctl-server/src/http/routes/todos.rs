//! Todo endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use todoctl_core::{BaseResponse, CreateTodo, Todo, UpdateTodo};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::state::AppState;

/// GET /todo - list todos without items
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos().find_all().await?))
}

/// GET /todo/with-items - list todos with their items
async fn list_todos_with_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos().find_all_with_items().await?))
}

/// POST /todo - create a new todo
async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodo>,
) -> Result<(StatusCode, Json<BaseResponse<Todo>>), ApiError> {
    let created = state.todos().create(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /todo/{id} - one todo with items
async fn get_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos().find_one(id).await?))
}

/// PATCH /todo/{id} - partial update
async fn update_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    Json(req): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos().update(id, req).await?))
}

/// DELETE /todo/{id} - delete todo and its items
async fn delete_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.todos().remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/with-items", get(list_todos_with_items))
        .route(
            "/todo/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}
