use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::Utc;

use super::server::AppState;
use crate::auth::AuthManager;
use crate::db::models::User;
use crate::error::TaskPulseError;

/// Extracts the authenticated user from a `Authorization: Bearer <token>`
/// header. Task routes take this as their first argument; a missing or bad
/// token rejects the request with 401 before the handler body runs.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = TaskPulseError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| TaskPulseError::Auth("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| TaskPulseError::Auth("Expected a bearer token".to_string()))?;

        let auth_mgr = AuthManager::new(&state.db_pool, state.config.token_secret.as_bytes());
        let user = auth_mgr.authenticate(token, Utc::now()).await?;

        Ok(AuthUser(user))
    }
}
