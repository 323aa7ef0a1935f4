//! Cart store.
//!
//! A cart is a mapping of product to quantity plus a delivery option. The
//! subtotal is always recomputed from the items after every mutation; it is
//! never accepted from a caller. Route handlers persist the full snapshot to
//! the session store after each mutation and restore it on the next request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitpass_core::{DeliveryOption, ProductId};

use crate::models::Product;

/// Flat surcharge applied to the total when delivery is selected: $5.99.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// One cart line: a product snapshot and its quantity.
///
/// Invariant: `quantity >= 1`. A line whose quantity drops to zero is
/// removed, never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Denormalized product snapshot taken at add time.
    pub product: Product,
}

/// A shopping cart with a derived subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub delivery_option: DeliveryOption,
    /// Σ(item.price × item.quantity). Derived; see [`Cart::recompute_subtotal`].
    pub subtotal: Decimal,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            delivery_option: DeliveryOption::Pickup,
            subtotal: Decimal::ZERO,
        }
    }
}

impl Cart {
    /// Add `quantity` of a product, merging into an existing line.
    ///
    /// A quantity of zero is treated as a removal, so callers passing
    /// unvalidated input cannot create zero-quantity lines.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            self.remove_item(&product.id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                product: product.clone(),
            });
        }
        self.recompute_subtotal();
    }

    /// Set the quantity of an existing line. Zero removes the line.
    ///
    /// Unknown product IDs are a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = quantity;
        }
        self.recompute_subtotal();
    }

    /// Remove a line. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
        self.recompute_subtotal();
    }

    /// Switch between pickup and delivery.
    ///
    /// Affects [`Cart::total`] but never the stored subtotal.
    pub const fn set_delivery_option(&mut self, option: DeliveryOption) {
        self.delivery_option = option;
    }

    /// Reset to an empty cart with the default delivery option.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Recompute the subtotal from the current items.
    ///
    /// Called after every mutation, and again after deserializing a persisted
    /// snapshot so a tampered subtotal can never survive a reload.
    pub fn recompute_subtotal(&mut self) {
        self.subtotal = self
            .items
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum();
    }

    /// Surcharge implied by the current delivery option.
    #[must_use]
    pub fn delivery_fee(&self) -> Decimal {
        match self.delivery_option {
            DeliveryOption::Pickup => Decimal::ZERO,
            DeliveryOption::Delivery => DELIVERY_FEE,
        }
    }

    /// Displayed total: subtotal plus the delivery surcharge.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal + self.delivery_fee()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
