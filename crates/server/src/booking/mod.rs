//! Booking flow.
//!
//! Drives the slot-reservation state machine:
//!
//! ```text
//! Idle -> Selecting(date) -> Booking(slot) -> Booked(booking)
//!                                          -> Failed(reason)
//! ```
//!
//! The capacity check happens *before* the simulated provider round trip, so
//! a full slot is rejected without spending the latency. Re-entry while a
//! booking is in flight is an error at the component level, not a UI
//! convention, and re-booking an already-booked slot returns the existing
//! booking instead of minting a duplicate.

mod ledger;
pub mod pass;

pub use ledger::SlotLedger;

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use chrono::NaiveDate;

use fitpass_core::{BookingId, BookingStatus, SlotId, UserId};

use crate::models::{Booking, Slot};

/// Errors surfaced by the booking flow, worded for direct display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The target slot has no remaining capacity.
    #[error("This slot is fully booked")]
    FullyBooked,
    /// The slot ID does not exist in the catalog.
    #[error("Slot not found")]
    UnknownSlot,
    /// Another booking is already in flight on this flow.
    #[error("A booking is already in progress")]
    InFlight,
    /// The flow already holds a confirmed booking for a different slot.
    #[error("A different slot was already booked")]
    AlreadyBooked,
}

/// Current position in the booking state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    Idle,
    Selecting { date: NaiveDate },
    Booking { slot_id: SlotId },
    Booked { booking: Booking },
    Failed { reason: String },
}

/// One user's walk through slot selection and reservation for a single gym.
#[derive(Debug)]
pub struct BookingFlow {
    user_id: Option<UserId>,
    state: BookingState,
    /// Simulated provider round-trip latency. Zero in tests.
    latency: Duration,
}

impl BookingFlow {
    /// Start a new flow in the `Idle` state.
    #[must_use]
    pub const fn new(user_id: Option<UserId>, latency: Duration) -> Self {
        Self {
            user_id,
            state: BookingState::Idle,
            latency,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Narrow a slot list to one date. Pure filter, always succeeds.
    pub fn select_date<'a>(&mut self, slots: &'a [Slot], date: NaiveDate) -> Vec<&'a Slot> {
        self.state = BookingState::Selecting { date };
        slots.iter().filter(|slot| slot.date == date).collect()
    }

    /// Reserve a slot, given the live remaining capacity.
    ///
    /// `remaining` is the slot's capacity minus both the catalog `booked`
    /// count and the ledger delta; the caller obtains it from the
    /// [`SlotLedger`] reservation it already holds (zero means the ledger
    /// refused).
    ///
    /// # Errors
    ///
    /// - [`BookingError::FullyBooked`] if no capacity remains, checked
    ///   before the simulated call.
    /// - [`BookingError::InFlight`] if a booking is already in progress.
    /// - [`BookingError::AlreadyBooked`] if this flow already booked a
    ///   different slot. Booking the same slot again is idempotent.
    pub async fn book_slot(&mut self, slot: &Slot, remaining: u32) -> Result<Booking, BookingError> {
        match &self.state {
            BookingState::Booking { .. } => return Err(BookingError::InFlight),
            BookingState::Booked { booking } => {
                if booking.slot_id == slot.id {
                    return Ok(booking.clone());
                }
                return Err(BookingError::AlreadyBooked);
            }
            _ => {}
        }

        if remaining == 0 {
            self.state = BookingState::Failed {
                reason: BookingError::FullyBooked.to_string(),
            };
            return Err(BookingError::FullyBooked);
        }

        self.state = BookingState::Booking {
            slot_id: slot.id.clone(),
        };

        // Simulated provider round trip. The capacity decision was already
        // made; the call itself always confirms.
        tokio::time::sleep(self.latency).await;

        let booking = Booking {
            id: BookingId::new(Uuid::new_v4().to_string()),
            user_id: self.user_id,
            gym_id: slot.gym_id.clone(),
            slot_id: slot.id.clone(),
            date: slot.date,
            status: BookingStatus::Confirmed,
        };

        self.state = BookingState::Booked {
            booking: booking.clone(),
        };
        Ok(booking)
    }
}
