//! Domain types for the server.
//!
//! These types represent validated domain objects separate from database row
//! types and wire payloads.

pub mod booking;
pub mod gym;
pub mod product;
pub mod session;
pub mod user;

pub use booking::Booking;
pub use gym::{GeoPoint, Gym, Slot};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::{OnboardingProfile, User};
