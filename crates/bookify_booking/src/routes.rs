// --- File: crates/bookify_booking/src/routes.rs ---

use crate::handlers::book_handler;
use crate::logic::BookingState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Creates a router containing the booking routes.
///
/// The state carries the collaborators built at startup; the backend nests
/// this router under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/book", post(book_handler))
        .with_state(state)
}
