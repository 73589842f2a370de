// --- File: crates/services/bookify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the external collaborators once at startup, driven by the runtime
//! flags in the configuration. Optional collaborators fall back to their
//! no-op implementations, so the booking flow always has a full set of
//! services to call.

use bookify_common::{is_db_enabled, is_gcal_enabled, is_twilio_enabled};
use bookify_common::services::{
    BoxFuture, BoxedError, CalendarEvent, CalendarEventResult, CalendarService,
    NoopNotificationService, NotificationResult, NotificationService, ServiceFactory,
};
use bookify_config::AppConfig;
use bookify_db::{BookingRepository, DbClient, NoopBookingRepository, SqlBookingRepository};
use bookify_gcal::{create_calendar_hub, GoogleCalendarService};
use bookify_twilio::TwilioNotificationService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Adapter that erases the Google Calendar error type so the service can be
/// held as `Arc<dyn CalendarService<Error = BoxedError>>`.
struct BoxedCalendarService {
    inner: GoogleCalendarService,
}

impl CalendarService for BoxedCalendarService {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .get_busy_times(&calendar_id, start_time, end_time)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_event(&calendar_id, event)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Adapter that erases the Twilio error type.
struct BoxedNotificationService {
    inner: TwilioNotificationService,
}

impl NotificationService for BoxedNotificationService {
    type Error = BoxedError;

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_sms(&to, &body)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Builds and holds the external service instances.
///
/// The calendar is the only collaborator that cannot be replaced with a
/// no-op: without it the availability check is meaningless, so when it is
/// disabled or fails to initialize the booking routes stay unmounted.
pub struct BookifyServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    notification_service: Arc<dyn NotificationService<Error = BoxedError>>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl BookifyServiceFactory {
    /// Create a new service factory from the loaded configuration.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let calendar_service = Self::init_calendar(&config).await;
        let booking_repository = Self::init_repository(&config).await;
        let notification_service = Self::init_notifier(&config);

        Self {
            config,
            calendar_service,
            notification_service,
            booking_repository,
        }
    }

    async fn init_calendar(
        config: &Arc<AppConfig>,
    ) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        if !is_gcal_enabled(config) {
            info!("Calendar service disabled via runtime config or missing gcal section.");
            return None;
        }

        let gcal_config = config.gcal.as_ref()?;
        match create_calendar_hub(gcal_config).await {
            Ok(hub) => {
                info!("Google Calendar service initialized.");
                let service = GoogleCalendarService::new(Arc::new(hub));
                Some(Arc::new(BoxedCalendarService { inner: service }))
            }
            Err(e) => {
                error!(
                    "Failed to initialize Google Calendar service: {}. Booking routes disabled.",
                    e
                );
                None
            }
        }
    }

    async fn init_repository(config: &Arc<AppConfig>) -> Arc<dyn BookingRepository> {
        if !is_db_enabled(config) {
            info!("Datastore disabled, bookings will not be persisted.");
            return Arc::new(NoopBookingRepository);
        }

        match DbClient::new(config).await {
            Ok(client) => {
                let repository = SqlBookingRepository::new(client);
                match repository.init_schema().await {
                    Ok(()) => {
                        info!("Booking repository initialized.");
                        Arc::new(repository)
                    }
                    Err(e) => {
                        error!(
                            "Failed to initialize booking schema: {}. Persistence disabled.",
                            e
                        );
                        Arc::new(NoopBookingRepository)
                    }
                }
            }
            Err(e) => {
                error!(
                    "Failed to connect to the datastore: {}. Persistence disabled.",
                    e
                );
                Arc::new(NoopBookingRepository)
            }
        }
    }

    fn init_notifier(config: &Arc<AppConfig>) -> Arc<dyn NotificationService<Error = BoxedError>> {
        if is_twilio_enabled(config) {
            info!("Twilio notification service initialized.");
            let service = TwilioNotificationService::new(config.clone());
            Arc::new(BoxedNotificationService { inner: service })
        } else {
            info!("Notification service disabled, confirmations will be skipped.");
            Arc::new(NoopNotificationService)
        }
    }

    /// The repository bookings are stored through. Falls back to the no-op
    /// implementation when the datastore is disabled or unreachable.
    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }
}

impl ServiceFactory for BookifyServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        self.calendar_service.clone()
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        Some(self.notification_service.clone())
    }
}
