//! Booking domain type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fitpass_core::{BookingId, BookingStatus, GymId, SlotId, UserId};

/// A confirmed (or later cancelled/completed) slot reservation.
///
/// Bookings are minted by the booking flow and live in the caller's session;
/// they are not persisted in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub user_id: Option<UserId>,
    pub gym_id: GymId,
    pub slot_id: SlotId,
    pub date: NaiveDate,
    pub status: BookingStatus,
}
