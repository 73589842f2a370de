// --- File: crates/bookify_booking/tests/booking_flow_test.rs ---
//! End-to-end tests for the booking flow against in-memory collaborators.


use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use bookify_booking::logic::process_booking;
use bookify_booking::{routes, BookingRequest};
use bookify_common::error::BookifyError;
use bookify_common::models::BookingStatus;
use bookify_common::services::NoopNotificationService;
use bookify_db::NoopBookingRepository;
use chrono::{TimeZone, Utc};
use fixtures::{test_config, test_state, MockCalendar, MockNotifier, MockRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn limpeza_request() -> BookingRequest {
    BookingRequest {
        service: Some("Limpeza".to_string()),
        date: Some("2025-06-01".to_string()),
        time: Some("10:00".to_string()),
        duration: None,
        name: Some("Maria Silva".to_string()),
        phone: Some("351912345678".to_string()),
        email: Some("maria@example.com".to_string()),
    }
}

#[tokio::test]
async fn missing_fields_abort_before_any_side_effect() {
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar.clone(), repository.clone(), notifier.clone());

    let payload = BookingRequest {
        service: Some("Limpeza".to_string()),
        ..Default::default()
    };
    let err = process_booking(&state, payload).await.unwrap_err();
    assert!(matches!(err, BookifyError::ValidationError(_)));

    assert_eq!(calendar.created_count(), 0);
    assert!(repository.stored().is_empty());
    assert!(notifier.sent_messages().is_empty());
}

#[tokio::test]
async fn overlapping_busy_window_yields_conflict_without_writes() {
    // 10:00 Lisbon on 2025-06-01 is 09:00 UTC; seed a busy block covering it.
    let busy_start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let busy_end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
    let calendar = Arc::new(MockCalendar::with_busy(vec![(busy_start, busy_end)]));
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar.clone(), repository.clone(), notifier.clone());

    let err = process_booking(&state, limpeza_request()).await.unwrap_err();
    assert!(matches!(err, BookifyError::ConflictError(_)));

    assert_eq!(calendar.created_count(), 0);
    assert!(repository.stored().is_empty());
    assert!(notifier.sent_messages().is_empty());
}

#[tokio::test]
async fn adjacent_busy_window_does_not_conflict() {
    // Busy block ends exactly when the appointment starts (09:00 UTC).
    let busy_start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    let busy_end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let calendar = Arc::new(MockCalendar::with_busy(vec![(busy_start, busy_end)]));
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar.clone(), repository.clone(), notifier.clone());

    let confirmation = process_booking(&state, limpeza_request()).await.unwrap();
    assert!(confirmation.success);
}

#[tokio::test]
async fn successful_booking_confirms_record_and_notifies() {
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar.clone(), repository.clone(), notifier.clone());

    let confirmation = process_booking(&state, limpeza_request()).await.unwrap();
    assert!(confirmation.success);
    let event_id = confirmation.event_id.clone().unwrap();
    let booking_id = confirmation.booking_id.unwrap();

    // Record went pending -> confirmed and references the calendar event.
    let stored = repository.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, Some(booking_id));
    assert_eq!(stored[0].status, BookingStatus::Confirmed);
    assert_eq!(stored[0].calendar_event_id.as_deref(), Some(event_id.as_str()));
    assert_eq!(stored[0].duration_minutes, 60);

    // Event window is the Lisbon-local slot converted to UTC.
    let created = calendar.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    let (calendar_id, event) = &created[0];
    assert_eq!(calendar_id, "primary");
    assert_eq!(event.start_time, "2025-06-01T09:00:00+00:00");
    assert_eq!(event.end_time, "2025-06-01T10:00:00+00:00");
    assert_eq!(event.summary, "Limpeza - Maria Silva");

    // SMS goes to the plus-prefixed number and names the slot.
    let sent = notifier.sent_messages();
    assert_eq!(sent.len(), 1);
    let (to, body) = &sent[0];
    assert_eq!(to, "+351912345678");
    assert!(body.contains("Limpeza"));
    assert!(body.contains("2025-06-01"));
    assert!(body.contains("10:00"));
}

#[tokio::test]
async fn explicit_duration_sets_event_window() {
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar.clone(), repository.clone(), notifier.clone());

    let mut payload = limpeza_request();
    payload.duration = Some(90);
    process_booking(&state, payload).await.unwrap();

    let created = calendar.created.lock().unwrap();
    assert_eq!(created[0].1.end_time, "2025-06-01T10:30:00+00:00");
}

#[tokio::test]
async fn disabled_datastore_books_without_record() {
    let calendar = Arc::new(MockCalendar::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = Arc::new(bookify_booking::BookingState {
        config: test_config(),
        calendar: calendar.clone(),
        repository: Arc::new(NoopBookingRepository),
        notifier: notifier.clone(),
    });

    let confirmation = process_booking(&state, limpeza_request()).await.unwrap();
    assert!(confirmation.success);
    assert!(confirmation.event_id.is_some());
    assert_eq!(confirmation.booking_id, None);

    // The calendar event and the SMS still happen.
    assert_eq!(calendar.created_count(), 1);
    assert_eq!(notifier.sent_messages().len(), 1);
}

#[tokio::test]
async fn disabled_notifier_still_confirms_booking() {
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let state = Arc::new(bookify_booking::BookingState {
        config: test_config(),
        calendar: calendar.clone(),
        repository: repository.clone(),
        notifier: Arc::new(NoopNotificationService),
    });

    let confirmation = process_booking(&state, limpeza_request()).await.unwrap();
    assert!(confirmation.success);
    assert_eq!(repository.stored()[0].status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn calendar_failure_leaves_pending_record() {
    let calendar = Arc::new(MockCalendar {
        fail_create: true,
        ..Default::default()
    });
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier::default());
    let state = test_state(calendar, repository.clone(), notifier.clone());

    let err = process_booking(&state, limpeza_request()).await.unwrap_err();
    match err {
        BookifyError::ExternalServiceError { service_name, .. } => {
            assert_eq!(service_name, "calendar");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // No rollback: the pending record stays behind.
    let stored = repository.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, BookingStatus::Pending);
    assert!(notifier.sent_messages().is_empty());
}

#[tokio::test]
async fn notification_failure_surfaces_after_confirmation() {
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let notifier = Arc::new(MockNotifier {
        fail: true,
        ..Default::default()
    });
    let state = test_state(calendar.clone(), repository.clone(), notifier);

    let err = process_booking(&state, limpeza_request()).await.unwrap_err();
    match err {
        BookifyError::ExternalServiceError { service_name, .. } => {
            assert_eq!(service_name, "notification");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The event and the confirmed record remain in place.
    assert_eq!(calendar.created_count(), 1);
    assert_eq!(repository.stored()[0].status, BookingStatus::Confirmed);
}

// --- HTTP layer ---

async fn post_book(state: Arc<bookify_booking::BookingState>, body: Value) -> (StatusCode, Vec<u8>) {
    let app = routes(state);
    let request = Request::builder()
        .method("POST")
        .uri("/book")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn http_book_returns_200_with_ids() {
    let state = test_state(
        Arc::new(MockCalendar::default()),
        Arc::new(MockRepository::default()),
        Arc::new(MockNotifier::default()),
    );
    let (status, body) = post_book(
        state,
        json!({
            "service": "Limpeza",
            "date": "2025-06-01",
            "time": "10:00",
            "name": "Maria Silva",
            "phone": "351912345678"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["success"], json!(true));
    assert!(parsed["eventId"].is_string());
    assert_eq!(parsed["bookingId"], json!(1));
}

#[tokio::test]
async fn http_book_returns_400_naming_missing_fields() {
    let state = test_state(
        Arc::new(MockCalendar::default()),
        Arc::new(MockRepository::default()),
        Arc::new(MockNotifier::default()),
    );
    let (status, body) = post_book(state, json!({ "service": "Limpeza" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("Missing required fields"));
    assert!(message.contains("phone"));
}

#[tokio::test]
async fn http_book_returns_400_for_absurd_duration() {
    // A duration near i64::MAX must come back as a client error, not abort
    // the handler task on overflowing time arithmetic.
    let calendar = Arc::new(MockCalendar::default());
    let repository = Arc::new(MockRepository::default());
    let state = test_state(
        calendar.clone(),
        repository.clone(),
        Arc::new(MockNotifier::default()),
    );
    let (status, body) = post_book(
        state,
        json!({
            "service": "Limpeza",
            "date": "2025-06-01",
            "time": "10:00",
            "duration": i64::MAX,
            "name": "Maria Silva",
            "phone": "351912345678"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("duration"));
    assert_eq!(calendar.created_count(), 0);
    assert!(repository.stored().is_empty());
}

#[tokio::test]
async fn http_book_returns_409_on_conflict() {
    let busy_start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let busy_end = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
    let state = test_state(
        Arc::new(MockCalendar::with_busy(vec![(busy_start, busy_end)])),
        Arc::new(MockRepository::default()),
        Arc::new(MockNotifier::default()),
    );
    let (status, _) = post_book(
        state,
        json!({
            "service": "Limpeza",
            "date": "2025-06-01",
            "time": "10:00",
            "name": "Maria Silva",
            "phone": "351912345678"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_book_returns_500_on_calendar_failure() {
    let state = test_state(
        Arc::new(MockCalendar {
            fail_create: true,
            ..Default::default()
        }),
        Arc::new(MockRepository::default()),
        Arc::new(MockNotifier::default()),
    );
    let (status, body) = post_book(
        state,
        json!({
            "service": "Limpeza",
            "date": "2025-06-01",
            "time": "10:00",
            "name": "Maria Silva",
            "phone": "351912345678"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("Failed to process booking"));
}
