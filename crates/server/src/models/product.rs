//! Marketplace product domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitpass_core::{GymId, ProductId};

/// A marketplace product.
///
/// Immutable reference data, created only by the catalog seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    /// Owning gym, if the product is sold by one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gym_id: Option<GymId>,
    pub in_stock: bool,
}
