//! Gym and slot domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitpass_core::{GymId, SlotAvailability, SlotId};

/// A geographic location with a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// A bookable time window at a gym with fixed capacity.
///
/// `booked` counts reservations baked into the catalog snapshot; live
/// reservations on top of it are tracked by the slot ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: SlotId,
    pub gym_id: GymId,
    pub date: NaiveDate,
    /// Start of the window, `HH:MM` wire format.
    pub start_time: String,
    /// End of the window, `HH:MM` wire format.
    pub end_time: String,
    pub capacity: u32,
    pub booked: u32,
}

impl Slot {
    /// Spots left in this slot, before any ledger delta.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.booked)
    }

    /// Availability label for this slot, before any ledger delta.
    #[must_use]
    pub const fn availability(&self) -> SlotAvailability {
        SlotAvailability::classify(self.booked, self.capacity)
    }
}

/// A gym listing with its owned slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: GymId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub location: GeoPoint,
    pub price: Decimal,
    pub rating: Decimal,
    pub amenities: Vec<String>,
    pub categories: Vec<String>,
    pub slots: Vec<Slot>,
}

impl Gym {
    /// Find an owned slot by ID.
    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| &slot.id == id)
    }
}
