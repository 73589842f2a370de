// --- File: crates/bookify_common/src/models.rs ---
//! Shared data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking record.
///
/// A booking is created `Pending` when a request is accepted and becomes
/// `Confirmed` once the calendar event has been created. There is no further
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A customer's request for a service at a specific date/time, as stored in
/// the datastore. The calendar event referenced by `calendar_event_id` is a
/// derived, loosely-coupled mirror; nothing enforces they stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Datastore record id. None before the record is persisted, and always
    /// None when persistence is disabled.
    pub id: Option<i64>,
    /// The requested service, free text.
    pub service: String,
    /// Calendar date of the appointment, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day of the appointment, `HH:MM`.
    pub time: String,
    /// Appointment duration in minutes.
    pub duration_minutes: i64,
    /// Customer name.
    pub name: String,
    /// Customer phone number as submitted.
    pub phone: String,
    /// Optional customer email.
    pub email: Option<String>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Id of the calendar event created for this booking, once confirmed.
    pub calendar_event_id: Option<String>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
}
