//! Booking route handlers.
//!
//! Bookings minted during a session are stored in the session alongside the
//! cart. Booking the same slot twice in one session returns the original
//! booking instead of reserving a second spot, and a concurrent second
//! request is rejected while the first is still in flight.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use fitpass_core::{BookingId, GymId, SlotId};

use crate::booking::{BookingError, BookingFlow, pass::AccessPass};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{Booking, session_keys};
use crate::state::AppState;

/// Booking request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub gym_id: GymId,
    pub slot_id: SlotId,
}

/// A confirmed booking together with its access pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: Booking,
    pub pass: AccessPass,
}

/// `POST /api/bookings`
///
/// Returns 201 with the new booking, or 200 with the existing one when this
/// session already booked the slot.
pub async fn create(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let (gym, slot) = state
        .catalog()
        .slot(&body.slot_id)
        .ok_or(AppError::Booking(BookingError::UnknownSlot))?;

    if gym.id != body.gym_id {
        return Err(AppError::BadRequest(
            "Slot does not belong to this gym".to_string(),
        ));
    }

    let bookings = load_bookings(&session).await?;

    // Same slot in the same session: hand back the original booking.
    if let Some(existing) = bookings.iter().find(|b| b.slot_id == slot.id) {
        let pass = AccessPass::render(existing, gym, &state.config().qr_api_base);
        return Ok((
            StatusCode::OK,
            Json(BookingResponse {
                booking: existing.clone(),
                pass,
            }),
        ));
    }

    // Reserve before the simulated confirmation delay, so a full slot is
    // rejected immediately and concurrent requests cannot oversell it. The
    // session-keyed hold rejects a second request for the same slot while
    // this one is still in flight.
    let holder = session.id().map(|id| id.to_string());
    let remaining = state.ledger().begin(slot, holder.as_deref())?;

    let mut flow = BookingFlow::new(user.map(|u| u.id), state.config().booking_delay);
    let outcome = flow.book_slot(slot, remaining.saturating_add(1)).await;
    state.ledger().finish(&slot.id, holder.as_deref());

    let booking = match outcome {
        Ok(booking) => booking,
        Err(err) => {
            state.ledger().release(&slot.id);
            return Err(err.into());
        }
    };

    // Another request on this session may have persisted a booking for the
    // slot while we waited; keep that one and give the spot back.
    let mut bookings = match load_bookings(&session).await {
        Ok(bookings) => bookings,
        Err(err) => {
            state.ledger().release(&slot.id);
            return Err(err);
        }
    };
    if let Some(existing) = bookings.iter().find(|b| b.slot_id == slot.id) {
        state.ledger().release(&slot.id);
        let pass = AccessPass::render(existing, gym, &state.config().qr_api_base);
        return Ok((
            StatusCode::OK,
            Json(BookingResponse {
                booking: existing.clone(),
                pass,
            }),
        ));
    }

    bookings.push(booking.clone());
    if let Err(err) = save_bookings(&session, &bookings).await {
        state.ledger().release(&slot.id);
        return Err(err);
    }

    tracing::info!(
        booking_id = %booking.id,
        slot_id = %slot.id,
        remaining,
        "slot booked"
    );

    let pass = AccessPass::render(&booking, gym, &state.config().qr_api_base);
    Ok((StatusCode::CREATED, Json(BookingResponse { booking, pass })))
}

/// `GET /api/bookings`
pub async fn index(session: Session) -> Result<Json<Vec<Booking>>> {
    let bookings = load_bookings(&session).await?;
    Ok(Json(bookings))
}

/// `GET /api/bookings/{id}/pass`
pub async fn pass(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BookingId>,
) -> Result<Json<AccessPass>> {
    let bookings = load_bookings(&session).await?;
    let booking = bookings
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| AppError::NotFound("Booking".to_string()))?;

    let gym = state
        .catalog()
        .gym(&booking.gym_id)
        .ok_or_else(|| AppError::NotFound("Gym".to_string()))?;

    Ok(Json(AccessPass::render(booking, gym, &state.config().qr_api_base)))
}

/// Restore the session's booking list.
async fn load_bookings(session: &Session) -> Result<Vec<Booking>> {
    Ok(session
        .get(session_keys::BOOKINGS)
        .await?
        .unwrap_or_default())
}

/// Persist the session's booking list.
async fn save_bookings(session: &Session, bookings: &[Booking]) -> Result<()> {
    session.insert(session_keys::BOOKINGS, bookings).await?;
    Ok(())
}
