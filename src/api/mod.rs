//! API handlers for Inventra REST endpoints

pub mod assignments;
pub mod auth;
pub mod device_types;
pub mod devices;
pub mod health;
pub mod openapi;
pub mod purchases;
pub mod reports;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;

use crate::{models::user::UserClaims, AppState};

/// Extractor for the current user, decoded from an optional bearer token.
///
/// Authentication is not enforced: a missing or undecodable token yields
/// `None` instead of a rejection. Handlers that want the caller's identity
/// (e.g. to default `created_by`) take this extractor; nothing else does.
pub struct CurrentUser(pub Option<UserClaims>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .and_then(|token| UserClaims::from_token(token, &state.config.auth.secret_key).ok());

        Ok(CurrentUser(claims))
    }
}
