//! HTTP route handlers for the FitPass API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database ping)
//!
//! # Auth
//! POST /api/auth/signup            - Register with email/password
//! POST /api/auth/login             - Login with email/password
//! POST /api/auth/google            - Exchange a Google credential
//! GET  /api/auth/me                - Current user (requires bearer token)
//! POST /api/auth/logout            - Logout
//!
//! # Catalog
//! GET  /api/gyms                   - Gym listing (search/amenities/price/category/sort)
//! GET  /api/gyms/{id}              - Gym detail
//! GET  /api/gyms/{id}/slots        - Bookable slots, optionally for one date
//! GET  /api/categories             - Membership tier labels
//! GET  /api/products               - Product listing (search/category/price)
//! GET  /api/products/{id}          - Product detail
//!
//! # Cart (session-backed)
//! GET    /api/cart                 - Current cart with totals
//! POST   /api/cart/items           - Add a product
//! PATCH  /api/cart/items           - Set a line quantity
//! DELETE /api/cart/items/{id}      - Remove a line
//! PUT    /api/cart/delivery        - Switch pickup/delivery
//! POST   /api/cart/checkout        - Finalize totals and empty the cart
//! DELETE /api/cart                 - Empty the cart
//!
//! # Bookings (session-backed)
//! POST /api/bookings               - Book a slot, returns booking + access pass
//! GET  /api/bookings               - Bookings made in this session
//! GET  /api/bookings/{id}/pass     - Access pass for a booking
//!
//! # Onboarding (requires bearer token)
//! GET  /api/onboarding             - Stored profile
//! POST /api/onboarding             - Create or replace the profile
//! ```

pub mod auth;
pub mod bookings;
pub mod cart;
pub mod gyms;
pub mod onboarding;
pub mod products;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/google", post(auth::google))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

/// Create the gym routes router.
pub fn gym_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gyms::index))
        .route("/{id}", get(gyms::show))
        .route("/{id}/slots", get(gyms::slots))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add_item).patch(cart::update_item))
        .route("/items/{id}", delete(cart::remove_item))
        .route("/delivery", put(cart::set_delivery))
        .route("/checkout", post(cart::checkout))
}

/// Create the booking routes router.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create).get(bookings::index))
        .route("/{id}/pass", get(bookings::pass))
}

/// Create the onboarding routes router.
pub fn onboarding_routes() -> Router<AppState> {
    Router::new().route("/", get(onboarding::show).post(onboarding::upsert))
}

/// Create all routes for the API, without rate limiting.
///
/// Tests drive this router directly; `rate_limited_routes` is what the
/// binary serves.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/api/categories", get(gyms::categories))
        .nest("/api/auth", auth_routes())
        .nest("/api/gyms", gym_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/bookings", booking_routes())
        .nest("/api/onboarding", onboarding_routes())
}

/// Create all routes with per-IP rate limiting applied.
///
/// Auth endpoints get the strict limiter; the rest of the API gets the
/// relaxed one. Health checks are never limited.
pub fn rate_limited_routes() -> Router<AppState> {
    let api = Router::new()
        .route("/categories", get(gyms::categories))
        .nest("/gyms", gym_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/bookings", booking_routes())
        .nest("/onboarding", onboarding_routes())
        .layer(crate::middleware::api_rate_limiter());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest(
            "/api/auth",
            auth_routes().layer(crate::middleware::auth_rate_limiter()),
        )
        .nest("/api", api)
}

/// Liveness check.
async fn health() -> &'static str {
    "OK"
}

/// Readiness check: verifies database connectivity.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(error) => {
            tracing::warn!(%error, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
