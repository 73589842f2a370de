// File: crates/bookify_booking/src/handlers.rs
use crate::logic::{process_booking, BookingConfirmation, BookingRequest, BookingState};
use axum::{extract::State, http::StatusCode, response::Json};
use bookify_common::{BookifyError, HttpStatusCode};
use std::sync::Arc;
use tracing::{error, info};

/// Handler for `POST /api/book`.
///
/// Status mapping comes from the shared error taxonomy: validation failures
/// 400, window conflicts 409, any external failure 500 with details in the
/// message.
#[axum::debug_handler]
pub async fn book_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, (StatusCode, String)> {
    match process_booking(&state, payload).await {
        Ok(confirmation) => {
            info!(
                "Booking accepted: event {:?}, record {:?}",
                confirmation.event_id, confirmation.booking_id
            );
            Ok(Json(confirmation))
        }
        Err(e) => Err(error_response(e)),
    }
}

fn error_response(e: BookifyError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match &e {
        BookifyError::ValidationError(msg) => msg.clone(),
        BookifyError::ConflictError(msg) => msg.clone(),
        _ => {
            error!("Error processing booking: {}", e);
            format!("Failed to process booking: {e}")
        }
    };
    (status, message)
}
