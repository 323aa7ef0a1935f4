//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::booking::SlotLedger;
use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::services::identity::{GoogleIdentityVerifier, IdentityVerifier};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    catalog: Catalog,
    ledger: SlotLedger,
    identity: Option<Arc<dyn IdentityVerifier>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Google sign-in is wired up only when `GOOGLE_CLIENT_ID` is configured.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let identity: Option<Arc<dyn IdentityVerifier>> =
            config.google_client_id.clone().map(|client_id| {
                Arc::new(GoogleIdentityVerifier::new(reqwest::Client::new(), client_id)) as _
            });

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog: Catalog::seed(),
                ledger: SlotLedger::new(),
                identity,
            }),
        }
    }

    /// Create state with a custom identity verifier (used by tests).
    #[must_use]
    pub fn with_identity(
        config: ServerConfig,
        pool: PgPool,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog: Catalog::seed(),
                ledger: SlotLedger::new(),
                identity: Some(identity),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the gym and product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the slot reservation ledger.
    #[must_use]
    pub fn ledger(&self) -> &SlotLedger {
        &self.inner.ledger
    }

    /// Get the identity verifier, if Google sign-in is configured.
    #[must_use]
    pub fn identity(&self) -> Option<&dyn IdentityVerifier> {
        self.inner.identity.as_deref()
    }
}
