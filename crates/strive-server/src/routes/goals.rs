use std::sync::Arc;

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use strive_core::goals::{GOAL_JOINED, GOAL_REMOVED};
use strive_core::{AppError, AuthUser};

use crate::dto::{
    DetailResponse, GoalMembershipRequest, GoalPatchRequest, GoalRequest, GoalResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/goals/",
    responses(
        (status = 200, description = "Goals the caller owns, joined, or that are public", body = Vec<GoalResponse>),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let goals = state.goals().list(user.id).await?;

    Ok(axum::Json(
        goals.into_iter().map(GoalResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/goals/",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Goal created", body = GoalResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    axum::Json(body): axum::Json<GoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.goals().create(user.id, body.into()).await?;

    Ok((StatusCode::CREATED, axum::Json(GoalResponse::from(goal))))
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}/",
    params(
        ("id" = i64, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "Goal details", body = GoalResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.goals().get(user.id, id).await?;

    Ok(axum::Json(GoalResponse::from(goal)))
}

#[utoipa::path(
    put,
    path = "/api/goals/{id}/",
    params(
        ("id" = i64, Path, description = "Goal ID")
    ),
    request_body = GoalRequest,
    responses(
        (status = 200, description = "Goal replaced", body = GoalResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<GoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.goals().update(user.id, id, body.into()).await?;

    Ok(axum::Json(GoalResponse::from(goal)))
}

#[utoipa::path(
    patch,
    path = "/api/goals/{id}/",
    params(
        ("id" = i64, Path, description = "Goal ID")
    ),
    request_body = GoalPatchRequest,
    responses(
        (status = 200, description = "Goal updated", body = GoalResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn patch_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<GoalPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.goals().patch(user.id, id, body.into()).await?;

    Ok(axum::Json(GoalResponse::from(goal)))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}/",
    params(
        ("id" = i64, Path, description = "Goal ID")
    ),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 403, description = "Not the owner", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.goals().delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/goals/join/",
    request_body = GoalMembershipRequest,
    responses(
        (status = 201, description = "Caller joined the goal", body = DetailResponse),
        (status = 400, description = "Missing goal ID", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn join_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    axum::Json(body): axum::Json<GoalMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.goals().join(user.id, required_goal(&body)?).await?;

    Ok((StatusCode::CREATED, axum::Json(DetailResponse::new(GOAL_JOINED))))
}

#[utoipa::path(
    post,
    path = "/api/goals/remove/",
    request_body = GoalMembershipRequest,
    responses(
        (status = 200, description = "Caller left the goal", body = DetailResponse),
        (status = 400, description = "Missing goal ID", body = crate::dto::ErrorResponse),
        (status = 404, description = "Goal not found or not joined", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "goals"
)]
pub async fn remove_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    axum::Json(body): axum::Json<GoalMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.goals().remove(user.id, required_goal(&body)?).await?;

    Ok(axum::Json(DetailResponse::new(GOAL_REMOVED)))
}

fn required_goal(body: &GoalMembershipRequest) -> Result<i64, AppError> {
    body.goal
        .ok_or_else(|| AppError::Validation("goal: This field is required.".into()))
}
