// --- File: crates/bookify_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for
//! Google Calendar. Availability is answered through the freebusy API; events
//! are inserted through the events API. The insert does NOT re-check
//! availability: the orchestration performs the check as a separate step, and
//! the window between check and insert is an acknowledged race.

use bookify_common::services::{
    BoxFuture, CalendarEvent, CalendarEventResult, CalendarService,
};
use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventDateTime, FreeBusyRequest, FreeBusyRequestItem};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Retrieves busy time periods for a calendar within a given time range.
    ///
    /// Queries the freebusy API for all periods overlapping
    /// `[start_time, end_time)`. The booking flow treats the window as
    /// available iff this returns an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError::ApiError` if the API call fails. No
    /// distinction is made between an unreachable calendar and a denied one.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let req = FreeBusyRequest {
                time_min: Some(start_time),
                time_max: Some(end_time),
                time_zone: Some("UTC".to_string()),
                items: Some(vec![FreeBusyRequestItem {
                    id: Some(calendar_id.to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            let (_response, freebusy_response) = calendar_hub.freebusy().query(req).doit().await?;

            let mut busy_periods = Vec::new();

            // Extract busy periods for the specified calendar
            if let Some(calendars) = freebusy_response.calendars {
                if let Some(cal_info) = calendars.get(&calendar_id) {
                    if let Some(busy_times) = &cal_info.busy {
                        for period in busy_times {
                            if let (Some(start_dt), Some(end_dt)) = (period.start, period.end) {
                                busy_periods.push((start_dt, end_dt));
                            } else {
                                info!(
                                    "Warning: Skipping busy period with missing start/end: {:?}",
                                    period
                                );
                            }
                        }
                    }
                }
            }
            // Sort busy periods for easier processing
            busy_periods.sort_by_key(|k| k.0);
            Ok(busy_periods)
        })
    }

    /// Creates a new calendar event in the specified calendar.
    ///
    /// Validates that the start and end times parse as RFC 3339 and that the
    /// end is after the start, then inserts the event with UTC times.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError` if:
    /// * The start or end time cannot be parsed (TimeParseError)
    /// * The end time is not after the start time (CalculationError)
    /// * The API call to Google Calendar fails (ApiError)
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let event = event.clone();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e)))?
                .with_timezone(&Utc);
            let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid end_time: {}", e)))?
                .with_timezone(&Utc);

            if end_dt <= start_dt {
                return Err(GcalServiceError::CalculationError(
                    "End time must be after start time".to_string(),
                ));
            }

            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(EventDateTime {
                    date_time: Some(start_dt),
                    time_zone: Some("UTC".to_string()), // Store event times in UTC
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(end_dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event.status.unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// Mock implementation of CalendarService for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock calendar service for testing.
    pub struct MockCalendarService {
        events: Mutex<HashMap<String, Vec<(String, CalendarEvent)>>>,
    }

    impl MockCalendarService {
        /// Create a new mock calendar service.
        pub fn new() -> Self {
            Self {
                events: Mutex::new(HashMap::new()),
            }
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalServiceError;

        fn get_busy_times(
            &self,
            calendar_id: &str,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                let events = self.events.lock().unwrap();
                let calendar_events = events.get(&calendar_id).cloned().unwrap_or_default();

                let mut busy_times = Vec::new();
                for (_, event) in calendar_events {
                    let event_start = DateTime::parse_from_rfc3339(&event.start_time)
                        .map_err(|e| GcalServiceError::TimeParseError(e.to_string()))?
                        .with_timezone(&Utc);
                    let event_end = DateTime::parse_from_rfc3339(&event.end_time)
                        .map_err(|e| GcalServiceError::TimeParseError(e.to_string()))?
                        .with_timezone(&Utc);

                    if event_start < end_time && event_end > start_time {
                        busy_times.push((event_start, event_end));
                    }
                }

                busy_times.sort_by_key(|k| k.0);
                Ok(busy_times)
            })
        }

        fn create_event(
            &self,
            calendar_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let calendar_id = calendar_id.to_string();
            let event = event.clone();

            Box::pin(async move {
                let start_dt = DateTime::parse_from_rfc3339(&event.start_time).map_err(|e| {
                    GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e))
                })?;
                let end_dt = DateTime::parse_from_rfc3339(&event.end_time).map_err(|e| {
                    GcalServiceError::TimeParseError(format!("Invalid end_time: {}", e))
                })?;

                if end_dt <= start_dt {
                    return Err(GcalServiceError::CalculationError(
                        "End time must be after start time".to_string(),
                    ));
                }

                let event_id = format!("mock-event-{}", uuid::Uuid::new_v4());

                let mut events = self.events.lock().unwrap();
                let calendar_events = events.entry(calendar_id.to_string()).or_insert_with(Vec::new);
                calendar_events.push((event_id.clone(), event));

                Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                })
            })
        }
    }
}
