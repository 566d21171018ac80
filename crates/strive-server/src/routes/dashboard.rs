use std::sync::Arc;

use axum::Extension;
use axum::extract::State;
use axum::response::IntoResponse;

use strive_core::AuthUser;

use crate::dto::DashboardResponse;
use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/dashboard/",
    responses(
        (status = 200, description = "The caller's goals, to-dos, habits and counts", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state.dashboard().load(user.id).await?;

    Ok(axum::Json(DashboardResponse::from(dashboard)))
}
