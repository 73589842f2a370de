//! Datastore integration for Bookify
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library, plus the booking
//! repository built on top of it. SQLite, PostgreSQL, and MySQL backends are
//! selected through feature flags.
//!
//! The datastore collaborator is optional: when no database is configured,
//! the [`NoopBookingRepository`] stands in and bookings proceed without
//! persistence.

pub mod client;
pub mod error;
pub mod repositories;

// Re-export the client and repository types for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repositories::{
    Booking, BookingRepository, BookingStatus, NoopBookingRepository, SqlBookingRepository,
};
