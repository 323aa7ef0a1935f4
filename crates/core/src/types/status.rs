//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

/// How a cart order is fulfilled.
///
/// Pickup is free; delivery adds a flat surcharge to the displayed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    #[default]
    Pickup,
    Delivery,
}

/// Derived availability label for a slot.
///
/// `AlmostFull` kicks in at 80% of capacity, `Full` when no spots remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAvailability {
    Available,
    AlmostFull,
    Full,
}

impl SlotAvailability {
    /// Classify a booked/capacity pair.
    #[must_use]
    pub const fn classify(booked: u32, capacity: u32) -> Self {
        if booked >= capacity {
            Self::Full
        } else if booked * 5 >= capacity * 4 {
            Self::AlmostFull
        } else {
            Self::Available
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_serde() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).expect("serialize");
        assert_eq!(json, "\"confirmed\"");
    }

    #[test]
    fn test_delivery_option_default_is_pickup() {
        assert_eq!(DeliveryOption::default(), DeliveryOption::Pickup);
    }

    #[test]
    fn test_availability_classification() {
        assert_eq!(
            SlotAvailability::classify(8, 20),
            SlotAvailability::Available
        );
        assert_eq!(
            SlotAvailability::classify(16, 20),
            SlotAvailability::AlmostFull
        );
        assert_eq!(SlotAvailability::classify(20, 20), SlotAvailability::Full);
        assert_eq!(SlotAvailability::classify(25, 25), SlotAvailability::Full);
    }
}
