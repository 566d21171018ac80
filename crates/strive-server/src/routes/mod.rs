use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_jwt;
use crate::dto::HealthResponse;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod habits;
pub mod todos;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/dashboard/", get(dashboard::dashboard))
        .route("/api/goals/", get(goals::list_goals).post(goals::create_goal))
        .route("/api/goals/join/", post(goals::join_goal))
        .route("/api/goals/remove/", post(goals::remove_goal))
        .route(
            "/api/goals/{id}/",
            get(goals::get_goal)
                .put(goals::update_goal)
                .patch(goals::patch_goal)
                .delete(goals::delete_goal),
        )
        .route("/api/todos/", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/api/todos/{id}/",
            get(todos::get_todo)
                .put(todos::update_todo)
                .patch(todos::patch_todo)
                .delete(todos::delete_todo),
        )
        .route(
            "/api/habits/",
            get(habits::list_habits).post(habits::create_habit),
        )
        .route(
            "/api/habits/{id}/",
            get(habits::get_habit)
                .put(habits::update_habit)
                .patch(habits::patch_habit)
                .delete(habits::delete_habit),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/token/", post(auth::obtain_token))
        .route("/api/token/refresh/", post(auth::refresh_token))
        .route("/api/register/", post(auth::register))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(HealthResponse {
                status: "healthy",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(HealthResponse {
                    status: "unhealthy",
                    database: "error",
                }),
            )
        }
    }
}
