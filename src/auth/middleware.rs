use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use super::AuthContext;
use crate::app::AppState;
use crate::error::ApiError;

/// Extractor that requires a valid Supabase bearer token.
///
/// ```ignore
/// async fn protected_route(auth: RequireAuth) -> impl IntoResponse {
///     format!("Hello, user {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl std::ops::Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::unauthorized("Missing authorization token")
                    } else {
                        ApiError::unauthorized("Invalid authorization format")
                    }
                })?;

        let token = bearer.token();
        if token.is_empty() {
            return Err(ApiError::unauthorized("Missing authorization token"));
        }

        let claims = state.jwks_cache.verify_token(token).await.map_err(|e| {
            tracing::warn!(error = %e, "JWT verification failed");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        let context = AuthContext::from_claims(&claims).map_err(|e| {
            tracing::warn!(error = %e, "Failed to build auth context");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        tracing::debug!(
            user_id = %context.user_id,
            role = context.role.as_deref().unwrap_or("none"),
            "Request authenticated"
        );

        Ok(RequireAuth(context))
    }
}
