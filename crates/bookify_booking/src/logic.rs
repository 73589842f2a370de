// --- File: crates/bookify_booking/src/logic.rs ---
//! Booking orchestration logic.
//!
//! A booking request runs through a fixed sequence of external calls:
//! validate, normalize the time window, check calendar availability, persist
//! a pending record, insert the calendar event, confirm the record, notify
//! the customer. Each stage waits for the prior one; there is no rollback,
//! so a failure mid-sequence leaves earlier side effects in place
//! (at-least-once semantics). The availability check and the event insert
//! are not atomic together: two concurrent requests for overlapping windows
//! can both pass the check.

use bookify_common::error::{
    conflict, config_error, external_service_error, validation_error, BookifyError,
};
use bookify_common::models::{Booking, BookingStatus};
use bookify_common::services::{
    BoxedError, CalendarEvent, CalendarService, NotificationService,
};
use bookify_config::AppConfig;
use bookify_db::BookingRepository;
use bookify_twilio::normalize_phone;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

/// Default appointment duration in minutes.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Longest accepted appointment, one full day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

// --- Data Structures ---

/// An incoming booking request, as posted to `/api/book`.
///
/// Required fields are deserialized as options so missing ones produce a 400
/// with a message naming them, not a deserialization rejection.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BookingRequest {
    pub service: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time of day, `HH:MM`.
    pub time: Option<String>,
    /// Duration in minutes, defaults to 60.
    pub duration: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A booking request after required-field validation.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub service: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct BookingConfirmation {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
    #[serde(rename = "bookingId")]
    pub booking_id: Option<i64>,
}

/// Shared state for the booking handlers.
///
/// The collaborators are constructed once at startup by the backend's
/// service factory and injected here, so tests can substitute doubles.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    pub repository: Arc<dyn BookingRepository>,
    pub notifier: Arc<dyn NotificationService<Error = BoxedError>>,
}

// --- Validation ---

/// Checks that all required fields are present and non-empty.
///
/// Missing fields are reported together so the client sees the full list in
/// one round trip. The duration defaults to 60 minutes and must fall within
/// `1..=MAX_DURATION_MINUTES`; the cap keeps the window arithmetic inside
/// the representable time range.
pub fn validate(payload: BookingRequest) -> Result<ValidatedBooking, BookifyError> {
    fn required(value: &Option<String>, name: &'static str, missing: &mut Vec<&'static str>) {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => missing.push(name),
        }
    }

    let mut missing = Vec::new();
    required(&payload.service, "service", &mut missing);
    required(&payload.date, "date", &mut missing);
    required(&payload.time, "time", &mut missing);
    required(&payload.name, "name", &mut missing);
    required(&payload.phone, "phone", &mut missing);

    if !missing.is_empty() {
        return Err(validation_error(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let duration_minutes = payload.duration.unwrap_or(DEFAULT_DURATION_MINUTES);
    if !(1..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
        return Err(validation_error(format!(
            "duration must be between 1 and {MAX_DURATION_MINUTES} minutes"
        )));
    }

    Ok(ValidatedBooking {
        service: payload.service.unwrap(),
        date: payload.date.unwrap(),
        time: payload.time.unwrap(),
        duration_minutes,
        name: payload.name.unwrap(),
        phone: payload.phone.unwrap(),
        email: payload.email,
    })
}

// --- Time Normalization ---

/// Combines a calendar date and a time of day into a `[start, end)` UTC
/// window of the given duration.
///
/// The date+time pair is interpreted in the given timezone with an explicit
/// offset conversion. Ambiguous local times (DST fold) resolve to the
/// earliest mapping; nonexistent local times (DST gap) are rejected, as are
/// durations whose end instant would overflow the calendar range.
pub fn normalize_window(
    date: &str,
    time: &str,
    duration_minutes: i64,
    tz: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>), BookifyError> {
    let naive_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| validation_error("Invalid date format (YYYY-MM-DD)"))?;
    let naive_time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| validation_error("Invalid time format (HH:MM)"))?;

    let naive = naive_date.and_time(naive_time);
    let start_local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(validation_error(format!(
                "{naive} does not exist in timezone {tz}"
            )))
        }
    };

    let start = start_local.with_timezone(&Utc);
    let duration = Duration::try_minutes(duration_minutes)
        .ok_or_else(|| validation_error("duration out of range"))?;
    let end = start
        .checked_add_signed(duration)
        .ok_or_else(|| validation_error("booking window exceeds the supported date range"))?;
    Ok((start, end))
}

/// The confirmation text sent to the customer. Carries the service, date and
/// time so the message stands on its own.
pub fn confirmation_message(booking: &ValidatedBooking) -> String {
    format!(
        "Booking confirmed: {} on {} at {}. See you then, {}!",
        booking.service, booking.date, booking.time, booking.name
    )
}

// --- Core Booking Flow ---

/// Processes a booking request end to end.
///
/// Step order and failure boundaries:
/// 1. required-field validation
/// 2. time window normalization
/// 3. availability check (busy window aborts with `Conflict`, no side effects)
/// 4. pending record write (no-op repository hands back no id)
/// 5. calendar event insert
/// 6. record confirmation with the event id, when a record exists
/// 7. SMS confirmation to the normalized phone number
///
/// Any external failure surfaces immediately and aborts the remaining steps;
/// side effects already performed stay as they are.
pub async fn process_booking(
    state: &BookingState,
    payload: BookingRequest,
) -> Result<BookingConfirmation, BookifyError> {
    // Step 1: validate required fields
    let booking = validate(payload)?;

    let gcal_config = state
        .config
        .gcal
        .as_ref()
        .ok_or_else(|| config_error("GCal configuration missing"))?;
    let tz = Tz::from_str(&gcal_config.time_zone)
        .map_err(|_| config_error(format!("Invalid timezone: {}", gcal_config.time_zone)))?;
    let calendar_id = gcal_config.calendar_id.as_str();

    // Step 2: normalize the time window
    let (start, end) = normalize_window(&booking.date, &booking.time, booking.duration_minutes, tz)?;

    // Step 3: availability check
    let busy_periods = state
        .calendar
        .get_busy_times(calendar_id, start, end)
        .await
        .map_err(|e| external_service_error("calendar", e))?;

    // Overlap check on the half-open window: (StartA < EndB) and (EndA > StartB)
    if busy_periods.iter().any(|(bs, be)| *bs < end && *be > start) {
        info!(
            "Booking conflict for {} between {} and {}",
            booking.service, start, end
        );
        return Err(conflict("Requested time slot is no longer available."));
    }

    // Step 4: write the pending record
    let pending = Booking {
        id: None,
        service: booking.service.clone(),
        date: booking.date.clone(),
        time: booking.time.clone(),
        duration_minutes: booking.duration_minutes,
        name: booking.name.clone(),
        phone: booking.phone.clone(),
        email: booking.email.clone(),
        status: BookingStatus::Pending,
        calendar_event_id: None,
        created_at: None,
    };
    let stored = state
        .repository
        .create_booking(pending)
        .await
        .map_err(|e| external_service_error("datastore", e))?;

    // Step 5: insert the calendar event
    let event = CalendarEvent {
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        summary: format!("{} - {}", booking.service, booking.name),
        description: Some(event_description(&booking)),
    };
    let created = state
        .calendar
        .create_event(calendar_id, event)
        .await
        .map_err(|e| external_service_error("calendar", e))?;
    let event_id = created
        .event_id
        .ok_or_else(|| external_service_error("calendar", "Calendar returned no event id"))?;
    info!("Calendar event created: {}", event_id);

    // Step 6: confirm the record, if one was persisted
    if let Some(id) = stored.id {
        state
            .repository
            .confirm_booking(id, &event_id)
            .await
            .map_err(|e| external_service_error("datastore", e))?;
    }

    // Step 7: notify the customer
    let destination = normalize_phone(&booking.phone);
    let message = confirmation_message(&booking);
    state
        .notifier
        .send_sms(&destination, &message)
        .await
        .map_err(|e| {
            error!("Failed to send confirmation SMS: {}", e);
            external_service_error("notification", e)
        })?;

    Ok(BookingConfirmation {
        success: true,
        event_id: Some(event_id),
        booking_id: stored.id,
    })
}

fn event_description(booking: &ValidatedBooking) -> String {
    let mut description = format!(
        "Service: {}\nCustomer: {}\nPhone: {}\nDuration: {} min",
        booking.service, booking.name, booking.phone, booking.duration_minutes
    );
    if let Some(email) = &booking.email {
        description.push_str(&format!("\nEmail: {email}"));
    }
    description
}
