//! Authentication route handlers.
//!
//! Handles signup, login, Google sign-in exchange, and token introspection.
//! Sessions are stateless bearer tokens; logout is a client-side discard,
//! the endpoint only clears server-side error-tracking context.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google sign-in request body.
#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    /// The ID token issued by Google Identity Services.
    pub token: String,
}

/// Login/Google response body: the token plus the account it names.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let auth = AuthService::new(state.pool(), &state.config().jwt_secret);
    let session = auth
        .signup(&body.email, &body.password, &body.username)
        .await?;

    set_sentry_user(&session.user.id, Some(session.user.email.as_str()));
    tracing::info!(user_id = %session.user.id, "user registered");

    Ok((StatusCode::CREATED, Json(json!({ "token": session.token }))))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let auth = AuthService::new(state.pool(), &state.config().jwt_secret);
    let session = auth.login(&body.email, &body.password).await?;

    set_sentry_user(&session.user.id, Some(session.user.email.as_str()));

    Ok(Json(SessionResponse {
        token: session.token,
        user: session.user,
    }))
}

/// `POST /api/auth/google`
pub async fn google(
    State(state): State<AppState>,
    Json(body): Json<GoogleSignInRequest>,
) -> Result<Json<SessionResponse>> {
    let verifier = state
        .identity()
        .ok_or_else(|| AppError::BadRequest("Google sign-in is not enabled".to_string()))?;

    let auth = AuthService::new(state.pool(), &state.config().jwt_secret);
    let session = auth.google_sign_in(verifier, &body.token).await?;

    set_sentry_user(&session.user.id, Some(session.user.email.as_str()));
    tracing::info!(user_id = %session.user.id, "google sign-in");

    Ok(Json(SessionResponse {
        token: session.token,
        user: session.user,
    }))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<Value>> {
    let auth = AuthService::new(state.pool(), &state.config().jwt_secret);

    // RequireAuth already verified the token; re-load for full account data.
    let user = auth
        .current_user_by_id(current.id)
        .await
        .map_err(AppError::Auth)?;

    Ok(Json(json!({ "user": user })))
}

/// `POST /api/auth/logout`
pub async fn logout() -> Json<Value> {
    clear_sentry_user();
    Json(json!({ "message": "Logged out" }))
}
