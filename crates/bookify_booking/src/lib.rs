// --- File: crates/bookify_booking/src/lib.rs ---
//! Booking orchestration crate.
//!
//! Exposes the `/book` endpoint plus the flow behind it. The handlers are
//! wired to the calendar, repository and notifier collaborators through
//! [`logic::BookingState`], built by the backend's service factory.

pub mod handlers;
pub mod logic;
pub mod routes;

pub use logic::{BookingConfirmation, BookingRequest, BookingState};
pub use routes::routes;
