//! Repository for booking records
//!
//! This module defines the interface for storing and updating booking records
//! in the datastore. The datastore record is the durable representation of a
//! booking; the calendar event it references is a loosely-coupled mirror.

use crate::error::DbError;
use bookify_common::services::BoxFuture;

// Re-export the shared booking model for convenience
pub use bookify_common::models::{Booking, BookingStatus};

/// Repository for booking records.
///
/// The trait is object-safe so the orchestration can hold it behind
/// `Arc<dyn BookingRepository>` and swap in the no-op implementation when the
/// datastore collaborator is not configured.
pub trait BookingRepository: Send + Sync {
    /// Initialize the database schema.
    ///
    /// Creates the bookings table if it doesn't already exist.
    fn init_schema(&self) -> BoxFuture<'_, (), DbError>;

    /// Persist a new booking record in `pending` status.
    ///
    /// # Returns
    ///
    /// The stored booking with its id set. The no-op implementation returns
    /// the booking unchanged, with no id.
    fn create_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, DbError>;

    /// Mark a booking `confirmed` and attach the calendar event id.
    fn confirm_booking(
        &self,
        id: i64,
        calendar_event_id: &str,
    ) -> BoxFuture<'_, Booking, DbError>;

    /// Read a booking record by id.
    fn find_by_id(&self, id: i64) -> BoxFuture<'_, Option<Booking>, DbError>;
}

/// No-op booking repository selected at startup when the datastore is not
/// configured. Bookings pass through without being persisted.
pub struct NoopBookingRepository;

impl BookingRepository for NoopBookingRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async { Ok(()) })
    }

    fn create_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, DbError> {
        Box::pin(async move {
            tracing::debug!("Datastore disabled, booking not persisted");
            Ok(Booking { id: None, ..booking })
        })
    }

    fn confirm_booking(
        &self,
        id: i64,
        _calendar_event_id: &str,
    ) -> BoxFuture<'_, Booking, DbError> {
        // The flow only confirms bookings that received an id, which the
        // no-op create never hands out.
        Box::pin(async move {
            Err(DbError::Other(format!(
                "cannot confirm booking {id}: persistence is disabled"
            )))
        })
    }

    fn find_by_id(&self, _id: i64) -> BoxFuture<'_, Option<Booking>, DbError> {
        Box::pin(async { Ok(None) })
    }
}
