use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use strive_core::Registration;

use crate::dto::{
    AccessTokenResponse, RefreshRequest, RegisterRequest, TokenPairResponse, TokenRequest,
    UserResponse,
};
use crate::error::ApiError;
use crate::extract::JsonOrForm;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Access and refresh tokens", body = TokenPairResponse),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn obtain_token(
    State(state): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = state
        .accounts()
        .login(&body.username, &body.password)
        .await?;

    Ok(axum::Json(TokenPairResponse::from(pair)))
}

#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Invalid or expired refresh token", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let access = state.accounts().refresh(&body.refresh).await?;

    Ok(axum::Json(AccessTokenResponse { access }))
}

#[utoipa::path(
    post,
    path = "/api/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid username, email or password", body = crate::dto::ErrorResponse),
        (status = 409, description = "Username taken", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .accounts()
        .register(Registration {
            username: body.username,
            password: body.password,
            email: body.email,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}
