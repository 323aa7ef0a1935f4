//! Access pass rendering.
//!
//! A confirmed booking is presented at the gym door as a QR code. The
//! payload format is fixed; the image itself comes from an external
//! QR-rendering collaborator, treated as a pure `payload -> image URL`
//! transform.

use serde::{Deserialize, Serialize};

use crate::models::{Booking, Gym};

/// A scannable gym-entry pass for a confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPass {
    /// The string encoded into the QR image.
    pub payload: String,
    /// URL of the rendered QR image.
    pub image_url: String,
}

impl AccessPass {
    /// Render the pass for a booking at its gym.
    #[must_use]
    pub fn render(booking: &Booking, gym: &Gym, qr_api_base: &str) -> Self {
        let payload = format!(
            "FitPass Gym Access - ID:{} - Gym:{} - Date:{}",
            booking.id, gym.name, booking.date
        );
        let image_url = format!(
            "{qr_api_base}?size=200x200&data={}",
            urlencoding::encode(&payload)
        );
        Self { payload, image_url }
    }
}
