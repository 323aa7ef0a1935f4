//! Authentication service.
//!
//! Owns the session state machine: an account is `Unauthenticated` until a
//! signup/login/Google exchange yields a bearer token, and any failure to
//! verify that token later means the caller falls back to `Unauthenticated`
//! (the token is treated as invalid, never retried).

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use fitpass_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;
use crate::services::identity::IdentityVerifier;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Token lifetime in seconds (1 hour).
const TOKEN_TTL_SECS: u64 = 60 * 60;

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: usize,
    /// Issued at (Unix timestamp).
    pub iat: usize,
}

/// A freshly authenticated session: the user and their bearer token.
#[derive(Debug)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

/// Authentication service.
///
/// Handles registration, login, Google sign-in exchange, and bearer-token
/// verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a SecretString) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
        }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new user with email and password, issuing a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(&email, username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.issue_token(user.id)?;
        Ok(AuthenticatedSession { user, token })
    }

    /// Login with email and password, issuing a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong email or password;
    /// the two cases are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Google-only accounts have no password hash and cannot password-login.
        let password_hash = password_hash.ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &password_hash)?;

        let token = self.issue_token(user.id)?;
        Ok(AuthenticatedSession { user, token })
    }

    // =========================================================================
    // Google Sign-In
    // =========================================================================

    /// Exchange a Google identity assertion for a session token.
    ///
    /// Verifies the assertion with the identity provider, then finds or
    /// creates the user by email. Failure at either step surfaces as a
    /// single `AuthError`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Identity` if the assertion is rejected or the
    /// provider is unreachable.
    pub async fn google_sign_in(
        &self,
        verifier: &dyn IdentityVerifier,
        assertion: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let claims = verifier.verify(assertion).await?;
        let email = Email::parse(&claims.email)?;

        let user = match self.users.get_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.users
                    .create_google(&email, claims.name.as_deref(), &claims.subject)
                    .await?
            }
        };

        let token = self.issue_token(user.id)?;
        Ok(AuthenticatedSession { user, token })
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Issue a bearer token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue_token(&self, user_id: UserId) -> Result<String, AuthError> {
        issue_token(user_id, self.jwt_secret)
    }

    /// Verify a bearer token and load the user it names.
    ///
    /// Any verification or lookup miss is `AuthError::InvalidToken`: the
    /// caller clears the token and restarts unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for malformed, expired, or orphaned
    /// tokens.
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let user_id = verify_token(token, self.jwt_secret)?;

        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Load an already-authenticated user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub async fn current_user_by_id(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Issue an HS256 bearer token for a user, expiring in one hour.
///
/// # Errors
///
/// Returns `AuthError::TokenSigning` if encoding fails.
pub fn issue_token(user_id: UserId, secret: &SecretString) -> Result<String, AuthError> {
    let now = unix_now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + usize::try_from(TOKEN_TTL_SECS).unwrap_or(usize::MAX),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| AuthError::TokenSigning)
}

/// Verify an HS256 bearer token and extract the user ID.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for malformed or expired tokens.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<UserId, AuthError> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<Claims>(token, &key, &validation).map_err(|_| AuthError::InvalidToken)?;

    let id: i32 = data
        .claims
        .sub
        .parse()
        .map_err(|_| AuthError::InvalidToken)?;
    Ok(UserId::new(id))
}

fn unix_now() -> usize {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| usize::try_from(d.as_secs()).unwrap_or(0))
        .unwrap_or(0)
}

/// Validate that a password meets minimum requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
