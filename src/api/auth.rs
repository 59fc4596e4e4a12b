//! Authentication placeholder endpoints
//!
//! Login issues real tokens but nothing requires them; see the startup
//! warning and `auth.enforce` in the configuration.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserBrief},
};

use super::CurrentUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserBrief,
}

fn brief(user: &User) -> UserBrief {
    UserBrief {
        user_id: user.user_id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        is_active: user.is_active,
    }
}

/// Verify credentials and issue a JWT
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user: brief(&user),
    }))
}

/// Get the user identified by the supplied bearer token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "No valid token supplied")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<User>> {
    let claims =
        claims.ok_or_else(|| AppError::Authentication("Not authenticated".to_string()))?;

    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user))
}
