//! Slot reservation ledger.
//!
//! The catalog is immutable, so its per-slot `booked` counts never change.
//! The ledger holds the live delta on top of the catalog snapshot and is the
//! single writer for reservations: the capacity check and the increment
//! happen under one lock, so concurrent requests can never oversell a slot.
//!
//! The same lock tracks which holders currently have a booking in flight for
//! a slot, so a second request from the same session is rejected instead of
//! racing the first one through the confirmation delay.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use fitpass_core::SlotId;

use super::BookingError;
use crate::models::Slot;

#[derive(Debug, Default)]
struct LedgerInner {
    reserved: HashMap<SlotId, u32>,
    in_flight: HashSet<(SlotId, String)>,
}

/// Increment-and-check reservation counter per slot.
#[derive(Debug, Default)]
pub struct SlotLedger {
    inner: Mutex<LedgerInner>,
}

impl SlotLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reservations recorded for a slot since startup.
    #[must_use]
    pub fn reserved(&self, slot_id: &SlotId) -> u32 {
        self.inner
            .lock()
            .map(|inner| inner.reserved.get(slot_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Spots left in a slot after catalog bookings and ledger reservations.
    #[must_use]
    pub fn remaining(&self, slot: &Slot) -> u32 {
        slot.remaining().saturating_sub(self.reserved(&slot.id))
    }

    /// Atomically reserve one spot in a slot.
    ///
    /// Returns the remaining capacity *after* this reservation.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::FullyBooked`] if the slot has no spots left.
    pub fn reserve(&self, slot: &Slot) -> Result<u32, BookingError> {
        self.begin(slot, None)
    }

    /// Reserve one spot and mark the holder's booking as in flight.
    ///
    /// The in-flight mark stays until [`finish`](Self::finish); a second
    /// `begin` from the same holder for the same slot fails while it
    /// stands. A `None` holder reserves without the mark (anonymous
    /// sessions cannot collide with themselves).
    ///
    /// # Errors
    ///
    /// - [`BookingError::InFlight`] if this holder already has a booking in
    ///   flight for the slot.
    /// - [`BookingError::FullyBooked`] if the slot has no spots left.
    pub fn begin(&self, slot: &Slot, holder: Option<&str>) -> Result<u32, BookingError> {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned lock means a panic mid-update; refuse new
            // reservations rather than risk overselling.
            Err(_) => return Err(BookingError::FullyBooked),
        };

        if let Some(holder) = holder
            && inner
                .in_flight
                .contains(&(slot.id.clone(), holder.to_owned()))
        {
            return Err(BookingError::InFlight);
        }

        let entry = inner.reserved.entry(slot.id.clone()).or_insert(0);
        let remaining = slot.remaining().saturating_sub(*entry);
        if remaining == 0 {
            return Err(BookingError::FullyBooked);
        }
        *entry += 1;

        if let Some(holder) = holder {
            inner.in_flight.insert((slot.id.clone(), holder.to_owned()));
        }
        Ok(remaining - 1)
    }

    /// Clear a holder's in-flight mark. The reservation itself stands.
    pub fn finish(&self, slot_id: &SlotId, holder: Option<&str>) {
        let Some(holder) = holder else { return };
        if let Ok(mut inner) = self.inner.lock() {
            inner.in_flight.remove(&(slot_id.clone(), holder.to_owned()));
        }
    }

    /// Give back one reserved spot.
    ///
    /// Used when a reservation was made but its booking was not kept, so
    /// the spot does not leak.
    pub fn release(&self, slot_id: &SlotId) {
        if let Ok(mut inner) = self.inner.lock()
            && let Some(count) = inner.reserved.get_mut(slot_id)
        {
            *count = count.saturating_sub(1);
        }
    }
}
