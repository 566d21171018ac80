use std::sync::Arc;

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use strive_core::AuthUser;
use strive_core::models::TodoFilter;

use crate::dto::{TodoListQuery, TodoPatchRequest, TodoRequest, TodoResponse};
use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/todos/",
    params(TodoListQuery),
    responses(
        (status = 200, description = "Caller's to-dos, open ones first", body = Vec<TodoResponse>),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<TodoListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = TodoFilter::from(query);
    let todos = state.todos().list(user.id, &filter).await?;

    Ok(axum::Json(
        todos.into_iter().map(TodoResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/todos/",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "To-do created", body = TodoResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    axum::Json(body): axum::Json<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos().create(user.id, body.into()).await?;

    Ok((StatusCode::CREATED, axum::Json(TodoResponse::from(todo))))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}/",
    params(
        ("id" = i64, Path, description = "To-do ID")
    ),
    responses(
        (status = 200, description = "To-do details", body = TodoResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos().get(user.id, id).await?;

    Ok(axum::Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}/",
    params(
        ("id" = i64, Path, description = "To-do ID")
    ),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "To-do replaced", body = TodoResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos().update(user.id, id, body.into()).await?;

    Ok(axum::Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    patch,
    path = "/api/todos/{id}/",
    params(
        ("id" = i64, Path, description = "To-do ID")
    ),
    request_body = TodoPatchRequest,
    responses(
        (status = 200, description = "To-do updated", body = TodoResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn patch_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<TodoPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos().patch(user.id, id, body.into()).await?;

    Ok(axum::Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}/",
    params(
        ("id" = i64, Path, description = "To-do ID")
    ),
    responses(
        (status = 204, description = "To-do deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "todos"
)]
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.todos().delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
