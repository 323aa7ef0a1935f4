//! Onboarding profile repository.
//!
//! Each user has at most one profile row; posting again replaces it.

use sqlx::PgPool;

use fitpass_core::UserId;

use super::RepositoryError;
use crate::models::OnboardingProfile;

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: i32,
    name: String,
    age: i32,
    gender: String,
    location: String,
    fitness_goals: Vec<String>,
    onboarded: bool,
}

impl From<ProfileRow> for OnboardingProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            name: row.name,
            age: row.age,
            gender: row.gender,
            location: row.location,
            fitness_goals: row.fitness_goals,
            onboarded: row.onboarded,
        }
    }
}

const PROFILE_COLUMNS: &str = "user_id, name, age, gender, location, fitness_goals, onboarded";

/// Repository for onboarding profile operations.
pub struct OnboardingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OnboardingRepository<'a> {
    /// Create a new onboarding repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stored profile for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<OnboardingProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM onboarding_profiles WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(OnboardingProfile::from))
    }

    /// Create or replace the profile for a user and mark it onboarded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        profile: &OnboardingProfile,
    ) -> Result<OnboardingProfile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO onboarding_profiles
                 (user_id, name, age, gender, location, fitness_goals, onboarded)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE)
             ON CONFLICT (user_id) DO UPDATE SET
                 name = EXCLUDED.name,
                 age = EXCLUDED.age,
                 gender = EXCLUDED.gender,
                 location = EXCLUDED.location,
                 fitness_goals = EXCLUDED.fitness_goals,
                 onboarded = TRUE,
                 updated_at = NOW()
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.user_id.as_i32())
        .bind(&profile.name)
        .bind(profile.age)
        .bind(&profile.gender)
        .bind(&profile.location)
        .bind(&profile.fitness_goals)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
