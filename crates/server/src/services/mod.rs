//! Service layer: authentication and external collaborators.

pub mod auth;
pub mod identity;
