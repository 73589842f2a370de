// --- File: crates/services/bookify_backend/src/app_state.rs ---
//! Application state shared across routes.

use std::sync::Arc;

use bookify_booking::BookingState;
use bookify_common::services::ServiceFactory;
use bookify_config::AppConfig;

use crate::service_factory::BookifyServiceFactory;

/// State assembled at startup and handed to the routers.
///
/// Collaborators are constructed once by the service factory and injected
/// into the booking state, so handlers never reach for globals.
pub struct AppState {
    pub config: Arc<AppConfig>,
    #[allow(dead_code)]
    pub service_factory: Arc<BookifyServiceFactory>,
    /// Present only when the calendar service initialized; without it the
    /// booking routes are not mounted.
    pub booking_state: Option<Arc<BookingState>>,
}

impl AppState {
    /// Build the application state from the loaded configuration.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(BookifyServiceFactory::new(config.clone()).await);

        let booking_state = service_factory.calendar_service().map(|calendar| {
            Arc::new(BookingState {
                config: config.clone(),
                calendar,
                repository: service_factory.booking_repository(),
                notifier: service_factory
                    .notification_service()
                    .expect("notification service always resolves to a no-op fallback"),
            })
        });

        Self {
            config,
            service_factory,
            booking_state,
        }
    }
}
