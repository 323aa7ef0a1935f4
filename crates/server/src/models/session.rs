//! Session-related types.
//!
//! Cart and bookings live in the visitor's session rather than the
//! database: one key holds the serialized cart, one key the bookings
//! minted for this session.

use serde::{Deserialize, Serialize};

use fitpass_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data carried by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session keys for persisted state.
pub mod session_keys {
    /// Key for the serialized cart snapshot.
    pub const CART: &str = "cart";

    /// Key for bookings minted during this session, keyed by slot.
    pub const BOOKINGS: &str = "bookings";
}
