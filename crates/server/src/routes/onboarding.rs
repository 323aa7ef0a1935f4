//! Onboarding route handlers.
//!
//! One profile per user, collected after signup. Posting again replaces the
//! stored profile; all fields are required on every submission.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::db::onboarding::OnboardingRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::OnboardingProfile;
use crate::state::AppState;

/// Onboarding submission body. Every field must be present and non-empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub fitness_goals: Option<Vec<String>>,
}

/// `GET /api/onboarding`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<OnboardingProfile>> {
    let repo = OnboardingRepository::new(state.pool());

    repo.get(user.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))
}

/// `POST /api/onboarding`
pub async fn upsert(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<OnboardingRequest>,
) -> Result<(StatusCode, Json<OnboardingProfile>)> {
    let profile = validate(user.id, body)?;

    let repo = OnboardingRepository::new(state.pool());
    let stored = repo.upsert(&profile).await?;

    tracing::info!(user_id = %user.id, "onboarding profile saved");
    Ok((StatusCode::CREATED, Json(stored)))
}

fn validate(
    user_id: fitpass_core::UserId,
    body: OnboardingRequest,
) -> Result<OnboardingProfile> {
    let missing = || AppError::BadRequest("Please provide all required fields".to_string());

    let name = body.name.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;
    let age = body.age.filter(|age| *age > 0).ok_or_else(missing)?;
    let gender = body
        .gender
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let location = body
        .location
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let fitness_goals = body
        .fitness_goals
        .filter(|goals| !goals.is_empty())
        .ok_or_else(missing)?;

    Ok(OnboardingProfile {
        user_id,
        name,
        age,
        gender,
        location,
        fitness_goals,
        onboarded: true,
    })
}
