//! Authentication extractors.
//!
//! Requests authenticate with a `Authorization: Bearer <token>` header. The
//! token is verified against the signing secret, then the user is loaded to
//! confirm the account still exists. Any failure along the way is treated as
//! an unauthenticated request.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for requests without a valid bearer token.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Authentication required" })),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection)?;

        let auth = AuthService::new(state.pool(), &state.config().jwt_secret);
        let user = auth.current_user(token).await.map_err(|_| AuthRejection)?;

        Ok(Self(CurrentUser {
            id: user.id,
            email: user.email,
        }))
    }
}

/// Extractor that optionally resolves the current user.
///
/// Unlike `RequireAuth`, this does not reject the request when the token is
/// missing or invalid.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(user)) => Some(user),
            Err(AuthRejection) => None,
        };

        Ok(Self(user))
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
