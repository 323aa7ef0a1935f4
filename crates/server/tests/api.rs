//! In-process API tests.
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`. Sessions use
//! an in-memory store and the database pool is lazy (never connected), so
//! these tests cover the catalog, cart, booking, and identity-provider
//! failure paths that don't touch `PostgreSQL`. Password login and
//! onboarding need a live database and are exercised separately.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use fitpass_server::config::ServerConfig;
use fitpass_server::routes;
use fitpass_server::services::identity::{IdentityClaims, IdentityError, IdentityVerifier};
use fitpass_server::state::AppState;

fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("postgres://localhost/fitpass_test"),
        host: "127.0.0.1".parse().expect("valid test host"),
        port: 0,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        jwt_secret: SecretString::from("y".repeat(32)),
        google_client_id: None,
        qr_api_base: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
        booking_delay: Duration::ZERO,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/fitpass_test")
        .expect("lazy pool")
}

fn with_session_layer(state: AppState) -> Router {
    routes::routes()
        .layer(SessionManagerLayer::new(MemoryStore::default()))
        .with_state(state)
}

/// Build the app with an in-memory session store and a never-connected pool.
fn app() -> Router {
    app_with_config(test_config())
}

fn app_with_config(config: ServerConfig) -> Router {
    with_session_layer(AppState::new(config, lazy_pool()))
}

fn app_with_identity(identity: Arc<dyn IdentityVerifier>) -> Router {
    with_session_layer(AppState::with_identity(test_config(), lazy_pool(), identity))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Send a request, returning status, JSON body, and any session cookie set.
async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Value, Option<String>) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);
    let body = body_json(response).await;
    (status, body, cookie)
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Identity provider that rejects every assertion.
struct RejectingVerifier;

#[async_trait]
impl IdentityVerifier for RejectingVerifier {
    async fn verify(&self, _assertion: &str) -> Result<IdentityClaims, IdentityError> {
        Err(IdentityError::Rejected("invalid signature".to_owned()))
    }
}

/// Identity provider that cannot be reached.
struct UnreachableVerifier;

#[async_trait]
impl IdentityVerifier for UnreachableVerifier {
    async fn verify(&self, _assertion: &str) -> Result<IdentityClaims, IdentityError> {
        Err(IdentityError::Unreachable("connection refused".to_owned()))
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_is_unauthenticated() {
    let app = app();
    let response = app
        .oneshot(get_request("/health", None))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Google sign-in
// ============================================================================

#[tokio::test]
async fn test_google_sign_in_is_rejected_when_not_configured() {
    let app = app();

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/auth/google", &json!({ "token": "x" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Google sign-in is not enabled");
}

#[tokio::test]
async fn test_google_sign_in_surfaces_provider_rejection() {
    let app = app_with_identity(Arc::new(RejectingVerifier));

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/google",
            &json!({ "token": "forged" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Google authentication failed");
}

#[tokio::test]
async fn test_google_sign_in_maps_unreachable_provider_to_bad_gateway() {
    let app = app_with_identity(Arc::new(UnreachableVerifier));

    let (status, _, _) = send(
        &app,
        json_request("POST", "/api/auth/google", &json!({ "token": "x" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// ============================================================================
// Gym Catalog
// ============================================================================

#[tokio::test]
async fn test_gym_list_returns_full_catalog() {
    let app = app();
    let (status, body, _) = send(&app, get_request("/api/gyms", None)).await;

    assert_eq!(status, StatusCode::OK);
    let gyms = body.as_array().expect("array");
    assert_eq!(gyms.len(), 3);
    assert_eq!(gyms[0]["name"], "FitZone Gym");
    assert_eq!(gyms[0]["price"], "50");
}

#[tokio::test]
async fn test_gym_search_matches_name_and_address_case_insensitively() {
    let app = app();

    let (_, body, _) = send(&app, get_request("/api/gyms?search=POWER", None)).await;
    let gyms = body.as_array().expect("array");
    assert_eq!(gyms.len(), 1);
    assert_eq!(gyms[0]["name"], "PowerHouse Fitness");

    // "Zen Blvd" only appears in Yoga Bliss's address
    let (_, body, _) = send(&app, get_request("/api/gyms?search=zen", None)).await;
    let gyms = body.as_array().expect("array");
    assert_eq!(gyms.len(), 1);
    assert_eq!(gyms[0]["name"], "Yoga Bliss Studio");
}

#[tokio::test]
async fn test_gym_amenities_require_every_selected_amenity() {
    let app = app();

    let (_, body, _) = send(
        &app,
        get_request("/api/gyms?amenities=Sauna,Juice%20Bar", None),
    )
    .await;
    let gyms = body.as_array().expect("array");
    assert_eq!(gyms.len(), 1);
    assert_eq!(gyms[0]["name"], "PowerHouse Fitness");

    // No gym has both a Sauna and a Tea Bar
    let (_, body, _) = send(
        &app,
        get_request("/api/gyms?amenities=Sauna,Tea%20Bar", None),
    )
    .await;
    assert!(body.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_gym_price_bounds_are_inclusive() {
    let app = app();

    let (_, body, _) = send(
        &app,
        get_request("/api/gyms?minPrice=50&maxPrice=60", None),
    )
    .await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|g| g["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["FitZone Gym", "Yoga Bliss Studio"]);
}

#[tokio::test]
async fn test_gym_sorting() {
    let app = app();

    let (_, body, _) = send(&app, get_request("/api/gyms?sortBy=price", None)).await;
    let prices: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|g| g["price"].as_str().expect("price"))
        .collect();
    assert_eq!(prices, vec!["50", "60", "75"]);

    let (_, body, _) = send(&app, get_request("/api/gyms?sortBy=rating", None)).await;
    let first = &body.as_array().expect("array")[0];
    assert_eq!(first["name"], "PowerHouse Fitness");

    // distance sort is accepted but leaves catalog order untouched
    let (_, body, _) = send(&app, get_request("/api/gyms?sortBy=distance", None)).await;
    assert_eq!(body.as_array().expect("array")[0]["name"], "FitZone Gym");
}

#[tokio::test]
async fn test_gym_category_filter() {
    let app = app();

    let (_, body, _) = send(&app, get_request("/api/gyms?category=Elite", None)).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|g| g["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["PowerHouse Fitness", "Yoga Bliss Studio"]);
}

#[tokio::test]
async fn test_gym_detail_and_unknown_gym() {
    let app = app();

    let (status, body, _) = send(&app, get_request("/api/gyms/2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "PowerHouse Fitness");

    let (status, body, _) = send(&app, get_request("/api/gyms/99", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gym not found");
}

#[tokio::test]
async fn test_categories_endpoint() {
    let app = app();
    let (status, body, _) = send(&app, get_request("/api/categories", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Basic", "Premium", "Elite"]));
}

// ============================================================================
// Slots
// ============================================================================

#[tokio::test]
async fn test_slots_report_availability_labels() {
    let app = app();
    let (status, body, _) = send(&app, get_request("/api/gyms/3/slots", None)).await;

    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().expect("array");
    assert_eq!(slots.len(), 2);

    // Slot 301: 20 of 25 booked, exactly at the almost-full threshold.
    assert_eq!(slots[0]["id"], "301");
    assert_eq!(slots[0]["remaining"], 5);
    assert_eq!(slots[0]["availability"], "almost_full");

    // Slot 302: 12 of 25 booked.
    assert_eq!(slots[1]["remaining"], 13);
    assert_eq!(slots[1]["availability"], "available");
}

#[tokio::test]
async fn test_slots_date_filter() {
    let app = app();

    let (_, body, _) = send(
        &app,
        get_request("/api/gyms/1/slots?date=2025-06-01", None),
    )
    .await;
    assert_eq!(body.as_array().expect("array").len(), 2);

    let (_, body, _) = send(
        &app,
        get_request("/api/gyms/1/slots?date=2025-06-02", None),
    )
    .await;
    assert!(body.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_slots_reflect_live_reservations() {
    let app = app();

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            &json!({ "gymId": "1", "slotId": "101" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body, _) = send(&app, get_request("/api/gyms/1/slots", None)).await;
    let slot = &body.as_array().expect("array")[0];
    assert_eq!(slot["id"], "101");
    // 20 capacity, 8 booked in the catalog, 1 live reservation
    assert_eq!(slot["remaining"], 11);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_listing_and_filters() {
    let app = app();

    let (status, body, _) = send(&app, get_request("/api/products", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 6);

    let (_, body, _) = send(
        &app,
        get_request("/api/products?category=Supplements", None),
    )
    .await;
    let products = body.as_array().expect("array");
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p["category"] == "Supplements"));

    let (_, body, _) = send(&app, get_request("/api/products?search=yoga", None)).await;
    assert_eq!(body.as_array().expect("array")[0]["name"], "Yoga Mat");
}

#[tokio::test]
async fn test_product_detail_and_unknown_product() {
    let app = app();

    let (status, body, _) = send(&app, get_request("/api/products/2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "24.99");

    let (status, _, _) = send(&app, get_request("/api/products/99", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_add_and_totals_follow_delivery_option() {
    let app = app();

    let (status, body, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "1", "quantity": 2 }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], "17.98");
    assert_eq!(body["itemCount"], 2);
    assert_eq!(body["deliveryOption"], "pickup");
    assert_eq!(body["deliveryFee"], "0");
    assert_eq!(body["total"], "17.98");
    let cookie = cookie.expect("session cookie");

    // Add a second product; lines merge by product.
    let (_, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "4" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(body["subtotal"], "21.97");
    assert_eq!(body["itemCount"], 3);

    // Switching to delivery adds the flat fee.
    let (_, body, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/cart/delivery",
            &json!({ "deliveryOption": "delivery" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(body["deliveryFee"], "5.99");
    assert_eq!(body["total"], "27.96");
}

#[tokio::test]
async fn test_cart_quantity_update_and_removal() {
    let app = app();

    let (_, _, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "2", "quantity": 1 }),
            None,
        ),
    )
    .await;
    let cookie = cookie.expect("session cookie");

    let (_, body, _) = send(
        &app,
        json_request(
            "PATCH",
            "/api/cart/items",
            &json!({ "productId": "2", "quantity": 3 }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(body["subtotal"], "74.97");

    // Quantity zero removes the line.
    let (_, body, _) = send(
        &app,
        json_request(
            "PATCH",
            "/api/cart/items",
            &json!({ "productId": "2", "quantity": 0 }),
            Some(&cookie),
        ),
    )
    .await;
    assert!(body["items"].as_array().expect("items").is_empty());
    assert_eq!(body["subtotal"], "0");
}

#[tokio::test]
async fn test_cart_remove_item_endpoint() {
    let app = app();

    let (_, _, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "3", "quantity": 1 }),
            None,
        ),
    )
    .await;
    let cookie = cookie.expect("session cookie");

    let (status, body, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/cart/items/3")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().expect("items").is_empty());
}

#[tokio::test]
async fn test_checkout_returns_summary_and_empties_cart() {
    let app = app();

    let (_, _, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "1", "quantity": 2 }),
            None,
        ),
    )
    .await;
    let cookie = cookie.expect("session cookie");

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/cart/checkout", &json!({}), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], "17.98");
    assert_eq!(body["total"], "17.98");

    let (_, body, _) = send(&app, get_request("/api/cart", Some(&cookie))).await;
    assert!(body["items"].as_array().expect("items").is_empty());
}

#[tokio::test]
async fn test_checkout_of_empty_cart_is_rejected() {
    let app = app();

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/cart/checkout", &json!({}), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");
}

#[tokio::test]
async fn test_cart_rejects_unknown_product() {
    let app = app();

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "99", "quantity": 1 }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn test_booking_mints_a_pass_and_is_idempotent_per_session() {
    let app = app();

    let (status, body, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            &json!({ "gymId": "1", "slotId": "101" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["booking"]["status"], "confirmed");
    assert_eq!(body["booking"]["slotId"], "101");
    let booking_id = body["booking"]["id"].as_str().expect("id").to_string();

    let payload = body["pass"]["payload"].as_str().expect("payload");
    assert_eq!(
        payload,
        format!("FitPass Gym Access - ID:{booking_id} - Gym:FitZone Gym - Date:2025-06-01")
    );
    let image_url = body["pass"]["imageUrl"].as_str().expect("image url");
    assert!(image_url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data="));

    // Booking the same slot again in this session returns the same booking.
    let cookie = cookie.expect("session cookie");
    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            &json!({ "gymId": "1", "slotId": "101" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["id"], booking_id.as_str());

    // And it shows up in the session's booking list.
    let (_, body, _) = send(&app, get_request("/api/bookings", Some(&cookie))).await;
    let bookings = body.as_array().expect("array");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], booking_id.as_str());

    // The pass endpoint re-renders the same payload.
    let (status, body, _) = send(
        &app,
        get_request(&format!("/api/bookings/{booking_id}/pass"), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"].as_str().expect("payload"), payload);
}

#[tokio::test]
async fn test_concurrent_same_session_bookings_hold_one_spot() {
    let mut config = test_config();
    config.booking_delay = Duration::from_millis(50);
    let app = app_with_config(config);

    // Mint a session cookie before racing the booking requests.
    let (_, _, cookie) = send(
        &app,
        json_request(
            "POST",
            "/api/cart/items",
            &json!({ "productId": "1" }),
            None,
        ),
    )
    .await;
    let cookie = cookie.expect("session cookie");

    let body = json!({ "gymId": "1", "slotId": "101" });
    let (first, second) = tokio::join!(
        send(&app, json_request("POST", "/api/bookings", &body, Some(&cookie))),
        send(&app, json_request("POST", "/api/bookings", &body, Some(&cookie))),
    );

    // One request wins the spot; the other is turned away while the first
    // is still confirming.
    let statuses = [first.0, second.0];
    assert!(statuses.contains(&StatusCode::CREATED));
    assert!(statuses.contains(&StatusCode::CONFLICT));
    let rejected = if first.0 == StatusCode::CONFLICT {
        &first.1
    } else {
        &second.1
    };
    assert_eq!(rejected["message"], "A booking is already in progress");

    // The session holds exactly one booking and exactly one spot is taken:
    // 20 capacity, 8 booked in the catalog, 1 live reservation.
    let (_, body, _) = send(&app, get_request("/api/bookings", Some(&cookie))).await;
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (_, body, _) = send(&app, get_request("/api/gyms/1/slots", Some(&cookie))).await;
    assert_eq!(body.as_array().expect("array")[0]["remaining"], 11);
}

#[tokio::test]
async fn test_booking_never_oversells_a_slot() {
    let app = app();
    let body = json!({ "gymId": "3", "slotId": "301" });

    // Slot 301 has 5 spots left; each request is a fresh session.
    for _ in 0..5 {
        let (status, _, _) = send(&app, json_request("POST", "/api/bookings", &body, None)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, response, _) =
        send(&app, json_request("POST", "/api/bookings", &body, None)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["message"], "This slot is fully booked");
}

#[tokio::test]
async fn test_booking_unknown_slot_and_gym_mismatch() {
    let app = app();

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            &json!({ "gymId": "1", "slotId": "999" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            &json!({ "gymId": "2", "slotId": "101" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Slot does not belong to this gym");
}

#[tokio::test]
async fn test_pass_for_unknown_booking_is_not_found() {
    let app = app();

    let (status, body, _) = send(&app, get_request("/api/bookings/nope/pass", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
}
