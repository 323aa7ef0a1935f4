//! User and onboarding domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fitpass_core::{Email, UserId};

/// A FitPass user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name chosen at signup (absent for some Google accounts).
    pub username: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One-time profile collected after signup.
///
/// Exactly one row per user; posting again replaces the stored profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub user_id: UserId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub location: String,
    pub fitness_goals: Vec<String>,
    pub onboarded: bool,
}
