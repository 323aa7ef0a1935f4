//! Cart route handlers.
//!
//! The cart lives in the visitor's session, so it survives restarts and
//! works for guests. Every mutation goes through [`Cart`]'s own methods,
//! and the subtotal is recomputed after each session restore so a stale
//! or tampered snapshot can never carry a wrong total.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use fitpass_core::{DeliveryOption, ProductId};

use crate::cart::{Cart, CartItem};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    /// Defaults to 1; zero and negative values are treated as removal.
    pub quantity: Option<i64>,
}

/// Quantity-update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Delivery-option request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub delivery_option: DeliveryOption,
}

/// A cart as presented to clients: stored lines plus derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub delivery_option: DeliveryOption,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            delivery_fee: cart.delivery_fee(),
            total: cart.total(),
            item_count: cart.item_count(),
            items: cart.items,
            delivery_option: cart.delivery_option,
            subtotal: cart.subtotal,
        }
    }
}

/// Checkout summary returned once the cart has been emptied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub delivery_option: DeliveryOption,
    pub item_count: u32,
}

/// `GET /api/cart`
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.into()))
}

/// `POST /api/cart/items`
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .product(&body.product_id)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let mut cart = load_cart(&session).await?;
    cart.add_item(product, clamp_quantity(body.quantity.unwrap_or(1)));
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `PATCH /api/cart/items`
pub async fn update_item(
    session: Session,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&body.product_id, clamp_quantity(body.quantity));
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `DELETE /api/cart/items/{id}`
pub async fn remove_item(session: Session, Path(id): Path<ProductId>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(&id);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `PUT /api/cart/delivery`
pub async fn set_delivery(
    session: Session,
    Json(body): Json<DeliveryRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.set_delivery_option(body.delivery_option);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// `POST /api/cart/checkout`
///
/// Finalizes the totals and empties the cart. No payment is taken.
pub async fn checkout(session: Session) -> Result<Json<CheckoutSummary>> {
    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let summary = CheckoutSummary {
        subtotal: cart.subtotal,
        delivery_fee: cart.delivery_fee(),
        total: cart.total(),
        delivery_option: cart.delivery_option,
        item_count: cart.item_count(),
    };

    cart.clear();
    save_cart(&session, &cart).await?;

    tracing::info!(total = %summary.total, "checkout completed");
    Ok(Json(summary))
}

/// `DELETE /api/cart`
pub async fn clear(session: Session) -> Result<StatusCode> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore the cart from the session, re-deriving the subtotal.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    let mut cart: Cart = session
        .get(session_keys::CART)
        .await?
        .unwrap_or_default();
    cart.recompute_subtotal();
    Ok(cart)
}

/// Persist the cart snapshot into the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Clients may send any integer; the domain only knows 0 and up.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}
