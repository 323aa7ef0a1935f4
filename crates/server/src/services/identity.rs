//! External identity-provider collaborator.
//!
//! Google sign-in hands the server an ID-token assertion; the server proves
//! it with Google's tokeninfo endpoint and gets back the subject's email and
//! name. The provider sits behind a trait so tests can inject a fake.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors from verifying an identity assertion.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected the assertion.
    #[error("assertion rejected: {0}")]
    Rejected(String),
    /// The assertion was issued for a different client.
    #[error("audience mismatch")]
    AudienceMismatch,
    /// The provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),
}

/// Verified claims extracted from an identity assertion.
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    /// Provider-scoped stable subject ID.
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
}

/// An opaque identity provider that turns assertions into verified claims.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an assertion token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the assertion is invalid, was issued for
    /// another client, or the provider cannot be reached.
    async fn verify(&self, assertion: &str) -> Result<IdentityClaims, IdentityError>;
}

/// Shape of Google's tokeninfo response (fields we use).
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    name: Option<String>,
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifier backed by Google's tokeninfo endpoint.
pub struct GoogleIdentityVerifier {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleIdentityVerifier {
    /// Create a verifier for the given OAuth client ID.
    #[must_use]
    pub fn new(http: reqwest::Client, client_id: String) -> Self {
        Self { http, client_id }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, assertion: &str) -> Result<IdentityClaims, IdentityError> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", assertion)])
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(body));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| IdentityError::Rejected(e.to_string()))?;

        if info.aud != self.client_id {
            return Err(IdentityError::AudienceMismatch);
        }

        Ok(IdentityClaims {
            subject: info.sub,
            email: info.email,
            name: info.name,
        })
    }
}
