use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use strive_core::auth::INVALID_TOKEN;
use strive_core::{AppError, AuthUser, TokenKind, UserStore};

use crate::error::ApiError;
use crate::state::AppState;

pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_INACTIVE: &str = "User is inactive";

/// Middleware that validates `Authorization: Bearer <access token>`, checks the
/// user is still active, and makes the caller available to handlers as `Extension<AuthUser>`.
pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let verified = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        None => return unauthorized(MISSING_CREDENTIALS),
        Some(header) => header
            .strip_prefix("Bearer ")
            .and_then(|token| state.tokens.verify(token.trim(), TokenKind::Access).ok()),
    };

    let Some(claims) = verified else {
        return unauthorized(INVALID_TOKEN);
    };

    // Deactivation takes effect before outstanding access tokens expire.
    let user = match state.db.user_repo().find_by_id(claims.user_id).await {
        Ok(Some(user)) if user.is_active => user,
        Ok(Some(_)) => return unauthorized(USER_INACTIVE),
        Ok(None) => return unauthorized(USER_NOT_FOUND),
        Err(e) => return ApiError(e).into_response(),
    };

    request.extensions_mut().insert(AuthUser::from(user));
    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    ApiError(AppError::Unauthorized(message.to_string())).into_response()
}
