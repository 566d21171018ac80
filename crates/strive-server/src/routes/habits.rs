use std::sync::Arc;

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use strive_core::AuthUser;

use crate::dto::{HabitPatchRequest, HabitRequest, HabitResponse};
use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/habits/",
    responses(
        (status = 200, description = "Caller's habits, newest first", body = Vec<HabitResponse>),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn list_habits(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let habits = state.habits().list(user.id).await?;

    Ok(axum::Json(
        habits.into_iter().map(HabitResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/habits/",
    request_body = HabitRequest,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn create_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    axum::Json(body): axum::Json<HabitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let habit = state.habits().create(user.id, body.into()).await?;

    Ok((StatusCode::CREATED, axum::Json(HabitResponse::from(habit))))
}

#[utoipa::path(
    get,
    path = "/api/habits/{id}/",
    params(
        ("id" = i64, Path, description = "Habit ID")
    ),
    responses(
        (status = 200, description = "Habit details", body = HabitResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn get_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let habit = state.habits().get(user.id, id).await?;

    Ok(axum::Json(HabitResponse::from(habit)))
}

#[utoipa::path(
    put,
    path = "/api/habits/{id}/",
    params(
        ("id" = i64, Path, description = "Habit ID")
    ),
    request_body = HabitRequest,
    responses(
        (status = 200, description = "Habit replaced", body = HabitResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn update_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<HabitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let habit = state.habits().update(user.id, id, body.into()).await?;

    Ok(axum::Json(HabitResponse::from(habit)))
}

#[utoipa::path(
    patch,
    path = "/api/habits/{id}/",
    params(
        ("id" = i64, Path, description = "Habit ID")
    ),
    request_body = HabitPatchRequest,
    responses(
        (status = 200, description = "Habit updated", body = HabitResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn patch_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<HabitPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let habit = state.habits().patch(user.id, id, body.into()).await?;

    Ok(axum::Json(HabitResponse::from(habit)))
}

#[utoipa::path(
    delete,
    path = "/api/habits/{id}/",
    params(
        ("id" = i64, Path, description = "Habit ID")
    ),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "habits"
)]
pub async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.habits().delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
