//! Gym catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitpass_core::{GymId, SlotAvailability};

use crate::catalog::filter::{GymFilter, SortKey, filter_gyms};
use crate::error::{AppError, Result};
use crate::models::{Gym, Slot};
use crate::state::AppState;

/// Query parameters for the gym listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymListQuery {
    pub search: Option<String>,
    /// Comma-separated amenity list, e.g. `amenities=Pool,Sauna`.
    pub amenities: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub category: Option<String>,
    pub sort_by: Option<SortKey>,
}

impl From<GymListQuery> for GymFilter {
    fn from(query: GymListQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            amenities: query
                .amenities
                .as_deref()
                .map(split_csv)
                .unwrap_or_default(),
            min_price: query.min_price,
            max_price: query.max_price,
            category: query.category,
            sort_by: query.sort_by.unwrap_or_default(),
        }
    }
}

/// Query parameters for the slot listing.
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// Restrict to one date (`YYYY-MM-DD`); omit for all dates.
    pub date: Option<NaiveDate>,
}

/// A slot as presented to clients: catalog data plus live availability.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    #[serde(flatten)]
    pub slot: Slot,
    /// Spots left after catalog bookings and live reservations.
    pub remaining: u32,
    pub availability: SlotAvailability,
}

impl SlotView {
    fn project(state: &AppState, slot: &Slot) -> Self {
        let reserved = state.ledger().reserved(&slot.id);
        Self {
            slot: slot.clone(),
            remaining: state.ledger().remaining(slot),
            availability: SlotAvailability::classify(
                slot.booked.saturating_add(reserved),
                slot.capacity,
            ),
        }
    }
}

/// `GET /api/gyms`
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<GymListQuery>,
) -> Json<Vec<Gym>> {
    let filter = GymFilter::from(query);
    Json(filter_gyms(state.catalog().gyms(), &filter))
}

/// `GET /api/gyms/{id}`
pub async fn show(State(state): State<AppState>, Path(id): Path<GymId>) -> Result<Json<Gym>> {
    state
        .catalog()
        .gym(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Gym".to_string()))
}

/// `GET /api/gyms/{id}/slots`
pub async fn slots(
    State(state): State<AppState>,
    Path(id): Path<GymId>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<SlotView>>> {
    let gym = state
        .catalog()
        .gym(&id)
        .ok_or_else(|| AppError::NotFound("Gym".to_string()))?;

    let views = gym
        .slots
        .iter()
        .filter(|slot| query.date.is_none_or(|date| slot.date == date))
        .map(|slot| SlotView::project(&state, slot))
        .collect();

    Ok(Json(views))
}

/// `GET /api/categories`
pub async fn categories(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.catalog().gym_categories().to_vec())
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
