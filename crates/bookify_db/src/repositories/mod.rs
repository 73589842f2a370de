//! Datastore repositories

pub mod booking;
pub mod booking_sql;

pub use booking::{Booking, BookingRepository, BookingStatus, NoopBookingRepository};
pub use booking_sql::SqlBookingRepository;
